#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Mahjong Solitaire.

use std::time::Duration;

use mahjong_solitaire_core::{
    tiles_match, Command, Event, GameBoard, LayoutId, MatchPair, SelectionRejection, TileId,
    TileIdAllocator, TileInstance,
};
use mahjong_solitaire_system_accessibility::is_free_tile;
use mahjong_solitaire_system_generation::{generate_board, GenerationTuning};
use mahjong_solitaire_system_matching::{check_stuck, check_win, get_hint};
use mahjong_solitaire_system_mutation::{remove_tile_pair, shuffle_board, undo_move};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

const DEFAULT_LAYOUT: LayoutId = LayoutId::Turtle;
const DEFAULT_SEED: u64 = 0x6d61_686a_6f6e_6721;

/// Progress of the current game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Pairs can still be removed.
    InProgress,
    /// Every tile has been removed.
    Won,
    /// Tiles remain but none of them can be matched.
    Stuck,
}

/// Represents the authoritative Mahjong Solitaire game state.
#[derive(Debug)]
pub struct World {
    board: GameBoard,
    selection: Option<TileId>,
    history: Vec<Vec<TileInstance>>,
    matches_made: usize,
    elapsed: Duration,
    status: GameStatus,
    fallback: bool,
    hint: Option<MatchPair>,
    tuning: GenerationTuning,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a world with a freshly dealt default board.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tuning(GenerationTuning::default())
    }

    /// Creates a world whose deals and shuffles use the provided tuning.
    #[must_use]
    pub fn with_tuning(tuning: GenerationTuning) -> Self {
        let mut world = Self::empty(tuning);
        world.start(DEFAULT_LAYOUT, DEFAULT_SEED);
        let _ = world.refresh_status();
        world
    }

    /// Creates a world with an empty table. Nothing is dealt until a
    /// [`Command::NewGame`] is applied.
    #[must_use]
    pub fn empty(tuning: GenerationTuning) -> Self {
        Self::from_board(GameBoard::new(DEFAULT_LAYOUT, Vec::new()), tuning, DEFAULT_SEED)
    }

    /// Creates a world around an existing board, for puzzles and tests.
    ///
    /// `seed` drives later shuffles.
    #[must_use]
    pub fn from_board(board: GameBoard, tuning: GenerationTuning, seed: u64) -> Self {
        let mut world = Self {
            board,
            selection: None,
            history: Vec::new(),
            matches_made: 0,
            elapsed: Duration::ZERO,
            status: GameStatus::InProgress,
            fallback: false,
            hint: None,
            tuning,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        let _ = world.refresh_status();
        world
    }

    fn start(&mut self, layout: LayoutId, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        let mut ids = TileIdAllocator::new();
        let generation = generate_board(layout, &mut self.rng, &self.tuning, &mut ids);
        self.fallback = generation.is_fallback();
        info!(
            %layout,
            seed,
            attempts = generation.attempts(),
            fallback = self.fallback,
            "dealt new game"
        );

        self.board = generation.into_board();
        self.selection = None;
        self.history.clear();
        self.matches_made = 0;
        self.elapsed = Duration::ZERO;
        self.status = GameStatus::InProgress;
        self.hint = None;
    }

    fn push_history(&mut self) {
        self.history.push(self.board.tiles.clone());
    }

    /// Recomputes counters and status from the tiles, returning whether the
    /// status changed.
    fn refresh_status(&mut self) -> bool {
        let removed = self.board.tiles.len() - self.board.remaining();
        self.matches_made = removed / 2;

        let status = if check_win(&self.board.tiles) {
            GameStatus::Won
        } else if check_stuck(&self.board.tiles) {
            GameStatus::Stuck
        } else {
            GameStatus::InProgress
        };
        let changed = status != self.status;
        self.status = status;
        changed
    }

    fn announce_status(&mut self, out_events: &mut Vec<Event>) {
        if !self.refresh_status() {
            return;
        }
        match self.status {
            GameStatus::Won => {
                info!(elapsed = ?self.elapsed, matches = self.matches_made, "game won");
                out_events.push(Event::GameWon {
                    elapsed: self.elapsed,
                });
            }
            GameStatus::Stuck => {
                let remaining = self.board.remaining();
                debug!(remaining, "no removable pairs left");
                out_events.push(Event::GameStuck { remaining });
            }
            GameStatus::InProgress => {}
        }
    }

    fn select(&mut self, tile_id: TileId, out_events: &mut Vec<Event>) {
        let reject = |reason| Event::SelectionRejected {
            tile: tile_id,
            reason,
        };

        if self.status == GameStatus::Won {
            out_events.push(reject(SelectionRejection::GameOver));
            return;
        }
        let Some(tile) = self.board.tile(tile_id).copied() else {
            out_events.push(reject(SelectionRejection::UnknownTile));
            return;
        };
        if tile.removed {
            out_events.push(reject(SelectionRejection::AlreadyRemoved));
            return;
        }
        if !is_free_tile(&tile, &self.board.tiles) {
            out_events.push(reject(SelectionRejection::Blocked));
            return;
        }

        let selected = self.selection.and_then(|id| self.board.tile(id).copied());
        match selected {
            None => {
                self.selection = Some(tile_id);
                out_events.push(Event::TileSelected { tile: tile_id });
            }
            Some(current) if current.id == tile_id => {
                self.selection = None;
                out_events.push(Event::SelectionCleared);
            }
            Some(current) if tiles_match(current.kind, tile.kind) => {
                let pair = MatchPair::new(current.id, tile_id);
                self.push_history();
                self.board.tiles = remove_tile_pair(&self.board.tiles, pair.first, pair.second);
                self.selection = None;
                self.hint = None;
                out_events.push(Event::PairRemoved { pair });
                self.announce_status(out_events);
            }
            Some(_) => {
                self.selection = Some(tile_id);
                out_events.push(Event::TileSelected { tile: tile_id });
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::NewGame { layout, seed } => {
            world.start(layout, seed);
            out_events.push(Event::GameStarted {
                layout,
                tiles: world.board.tiles.len(),
                fallback: world.fallback,
            });
            world.announce_status(out_events);
        }
        Command::SelectTile { tile } => world.select(tile, out_events),
        Command::Shuffle => {
            if world.status == GameStatus::Won {
                return;
            }
            world.push_history();
            let shuffled = shuffle_board(&world.board, &mut world.rng, &world.tuning);
            world.fallback = shuffled.is_fallback();
            debug!(
                attempts = shuffled.attempts(),
                fallback = world.fallback,
                "shuffled remaining tiles"
            );
            world.board = shuffled.into_board();
            world.selection = None;
            world.hint = None;
            out_events.push(Event::BoardShuffled {
                fallback: world.fallback,
            });
            world.announce_status(out_events);
        }
        Command::Undo => {
            let Some(previous) = world.history.pop() else {
                return;
            };
            world.board.tiles = undo_move(&world.board.tiles, &previous);
            world.selection = None;
            world.hint = None;
            out_events.push(Event::MoveUndone);
            world.announce_status(out_events);
        }
        Command::RequestHint => {
            world.hint = get_hint(&world.board.tiles);
            match world.hint {
                Some(pair) => out_events.push(Event::HintRevealed { pair }),
                None => out_events.push(Event::HintUnavailable),
            }
        }
        Command::Tick { dt } => {
            if world.status != GameStatus::Won {
                world.elapsed = world.elapsed.saturating_add(dt);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{GameStatus, World};
    use mahjong_solitaire_core::{GameBoard, LayoutId, MatchPair, TileId, TileInstance};
    use mahjong_solitaire_system_accessibility::free_tiles;

    /// Provides read-only access to the current board.
    #[must_use]
    pub fn board(world: &World) -> &GameBoard {
        &world.board
    }

    /// Layout of the current board.
    #[must_use]
    pub fn layout(world: &World) -> LayoutId {
        world.board.layout
    }

    /// Tiles of the current board, removed ones included.
    #[must_use]
    pub fn tiles(world: &World) -> &[TileInstance] {
        &world.board.tiles
    }

    /// Tiles the player may currently select.
    #[must_use]
    pub fn selectable_tiles(world: &World) -> Vec<TileId> {
        free_tiles(&world.board.tiles)
            .into_iter()
            .map(|tile| tile.id)
            .collect()
    }

    /// Currently selected tile, if any.
    #[must_use]
    pub fn selection(world: &World) -> Option<TileId> {
        world.selection
    }

    /// Pair revealed by the last hint request, cleared by the next move.
    #[must_use]
    pub fn hint(world: &World) -> Option<MatchPair> {
        world.hint
    }

    /// Number of tiles still on the board.
    #[must_use]
    pub fn tiles_remaining(world: &World) -> usize {
        world.board.remaining()
    }

    /// Number of pairs removed from the current board.
    #[must_use]
    pub fn matches_made(world: &World) -> usize {
        world.matches_made
    }

    /// Simulated time spent on the current game.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Progress of the current game.
    #[must_use]
    pub fn status(world: &World) -> GameStatus {
        world.status
    }

    /// Whether every tile has been removed.
    #[must_use]
    pub fn is_complete(world: &World) -> bool {
        world.status == GameStatus::Won
    }

    /// Whether tiles remain but none can be matched.
    #[must_use]
    pub fn is_stuck(world: &World) -> bool {
        world.status == GameStatus::Stuck
    }

    /// Whether the last deal or shuffle gave up the solvability guarantee.
    #[must_use]
    pub fn used_fallback(world: &World) -> bool {
        world.fallback
    }

    /// Number of snapshots available to undo.
    #[must_use]
    pub fn history_depth(world: &World) -> usize {
        world.history.len()
    }
}
