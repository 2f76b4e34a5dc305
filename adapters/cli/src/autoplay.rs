use std::{fmt, time::Duration};

use mahjong_solitaire_core::{Command, Event, LayoutId};
use mahjong_solitaire_world::{self as world, query, GameStatus, World};
use tracing::{debug, info};

use crate::config::CliConfig;

const THINK_TIME: Duration = Duration::from_secs(2);

/// Outcome of one headless game.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlaySummary {
    pub(crate) layout: LayoutId,
    pub(crate) seed: u64,
    pub(crate) tiles: usize,
    pub(crate) matches: usize,
    pub(crate) shuffles: u32,
    pub(crate) fallback_shuffles: u32,
    pub(crate) fallback_deal: bool,
    pub(crate) status: GameStatus,
    pub(crate) remaining: usize,
    pub(crate) elapsed: Duration,
}

/// Deals `layout` and plays it by always removing the first hinted pair,
/// shuffling whenever the board gets stuck.
pub(crate) fn play(layout: LayoutId, seed: u64, config: &CliConfig) -> PlaySummary {
    let mut world = World::empty(config.generation);
    let mut shuffles = 0;
    let mut fallback_shuffles = 0;
    let mut fallback_deal = false;

    for event in run(&mut world, Command::NewGame { layout, seed }) {
        if let Event::GameStarted { fallback, .. } = event {
            fallback_deal = fallback;
        }
    }

    loop {
        match query::status(&world) {
            GameStatus::Won => break,
            GameStatus::Stuck if shuffles >= config.max_shuffles => break,
            GameStatus::Stuck => {
                shuffles += 1;
                for event in run(&mut world, Command::Shuffle) {
                    if let Event::BoardShuffled { fallback: true } = event {
                        fallback_shuffles += 1;
                    }
                }
                info!(shuffles, remaining = query::tiles_remaining(&world), "shuffled stuck board");
                continue;
            }
            GameStatus::InProgress => {}
        }

        let _ = run(&mut world, Command::Tick { dt: THINK_TIME });
        let Some(pair) = hint(&mut world) else {
            break;
        };
        let _ = run(&mut world, Command::SelectTile { tile: pair.first });
        let events = run(&mut world, Command::SelectTile { tile: pair.second });
        debug!(?pair, ?events, "played hinted pair");
    }

    PlaySummary {
        layout,
        seed,
        tiles: query::tiles(&world).len(),
        matches: query::matches_made(&world),
        shuffles,
        fallback_shuffles,
        fallback_deal,
        status: query::status(&world),
        remaining: query::tiles_remaining(&world),
        elapsed: query::elapsed(&world),
    }
}

fn hint(world: &mut World) -> Option<mahjong_solitaire_core::MatchPair> {
    run(world, Command::RequestHint)
        .into_iter()
        .find_map(|event| match event {
            Event::HintRevealed { pair } => Some(pair),
            _ => None,
        })
}

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

impl fmt::Display for PlaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.status {
            GameStatus::Won => "won",
            GameStatus::Stuck => "stuck",
            GameStatus::InProgress => "unfinished",
        };
        writeln!(f, "layout:    {} (seed {})", self.layout, self.seed)?;
        writeln!(f, "outcome:   {outcome}")?;
        writeln!(f, "matches:   {} of {}", self.matches, self.tiles / 2)?;
        writeln!(f, "remaining: {}", self.remaining)?;
        writeln!(
            f,
            "shuffles:  {} ({} without guarantee)",
            self.shuffles, self.fallback_shuffles
        )?;
        writeln!(
            f,
            "deal:      {}",
            if self.fallback_deal { "fallback" } else { "solvable" }
        )?;
        write!(f, "elapsed:   {}s", self.elapsed.as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoplay_is_deterministic() {
        let config = CliConfig::default();
        let first = play(LayoutId::Pyramid, 12, &config);
        let second = play(LayoutId::Pyramid, 12, &config);
        assert_eq!(first, second);
        assert_eq!(first.tiles, 120);
        assert_eq!(first.matches * 2 + first.remaining, first.tiles);
    }

    #[test]
    fn shuffle_budget_is_respected() {
        let config = CliConfig {
            max_shuffles: 0,
            ..CliConfig::default()
        };
        let summary = play(LayoutId::Bridge, 3, &config);
        assert_eq!(summary.shuffles, 0);
        assert_ne!(summary.status, GameStatus::InProgress);
    }

    #[test]
    fn summary_reports_the_outcome() {
        let summary = PlaySummary {
            layout: LayoutId::Dragon,
            seed: 4,
            tiles: 142,
            matches: 71,
            shuffles: 1,
            fallback_shuffles: 0,
            fallback_deal: false,
            status: GameStatus::Won,
            remaining: 0,
            elapsed: Duration::from_secs(142),
        };
        let text = summary.to_string();
        assert!(text.contains("dragon (seed 4)"));
        assert!(text.contains("outcome:   won"));
        assert!(text.contains("matches:   71 of 71"));
        assert!(text.contains("elapsed:   142s"));
    }
}
