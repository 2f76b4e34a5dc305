use std::time::Duration;

use mahjong_solitaire_core::{
    tile_type_by_key, Command, Event, GameBoard, GridPoint, LayoutId, MatchPair, SelectionRejection,
    TileId, TileIdAllocator, TileInstance,
};
use mahjong_solitaire_system_generation::{generate_board, GenerationTuning};
use mahjong_solitaire_world::{self as world, query, GameStatus, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn tile(id: u32, key: &str, x: f32, y: f32, z: u8) -> TileInstance {
    let kind = tile_type_by_key(key).expect("catalog key").id;
    TileInstance::new(TileId::new(id), kind, GridPoint::new(x, y, z))
}

fn world_with(tiles: Vec<TileInstance>) -> World {
    World::from_board(
        GameBoard::new(LayoutId::Pyramid, tiles),
        GenerationTuning::default(),
        5,
    )
}

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

fn select(world: &mut World, id: u32) -> Vec<Event> {
    run(world, Command::SelectTile { tile: TileId::new(id) })
}

/// One matching pair spread along a row, followed by two unrelated faces.
fn strip() -> Vec<TileInstance> {
    vec![
        tile(0, "circle-1", 0.0, 0.0, 0),
        tile(1, "circle-1", 4.0, 0.0, 0),
        tile(2, "circle-2", 8.0, 0.0, 0),
        tile(3, "circle-3", 12.0, 0.0, 0),
    ]
}

#[test]
fn new_game_deals_the_requested_layout() {
    let mut world = World::new();
    let events = run(
        &mut world,
        Command::NewGame {
            layout: LayoutId::Pyramid,
            seed: 17,
        },
    );

    assert!(matches!(
        events.first(),
        Some(Event::GameStarted {
            layout: LayoutId::Pyramid,
            tiles: 120,
            ..
        })
    ));
    assert_eq!(query::layout(&world), LayoutId::Pyramid);
    assert_eq!(query::tiles_remaining(&world), 120);
    assert_eq!(query::matches_made(&world), 0);
    assert_eq!(query::elapsed(&world), Duration::ZERO);
    assert_eq!(query::history_depth(&world), 0);
}

#[test]
fn rejected_clicks_leave_the_selection_alone() {
    let mut tiles = strip();
    tiles.push(tile(4, "circle-9", 0.0, 0.0, 1));
    let mut world = world_with(tiles);

    assert_eq!(
        select(&mut world, 0),
        vec![Event::SelectionRejected {
            tile: TileId::new(0),
            reason: SelectionRejection::Blocked,
        }]
    );
    assert_eq!(
        select(&mut world, 99),
        vec![Event::SelectionRejected {
            tile: TileId::new(99),
            reason: SelectionRejection::UnknownTile,
        }]
    );
    assert_eq!(query::selection(&world), None);
}

#[test]
fn clicking_the_selected_tile_clears_it() {
    let mut world = world_with(strip());
    assert_eq!(select(&mut world, 2), vec![Event::TileSelected { tile: TileId::new(2) }]);
    assert_eq!(select(&mut world, 2), vec![Event::SelectionCleared]);
    assert_eq!(query::selection(&world), None);
}

#[test]
fn mismatched_click_moves_the_selection() {
    let mut world = world_with(strip());
    let _ = select(&mut world, 0);
    assert_eq!(select(&mut world, 2), vec![Event::TileSelected { tile: TileId::new(2) }]);
    assert_eq!(query::selection(&world), Some(TileId::new(2)));
    assert_eq!(query::tiles_remaining(&world), 4);
}

#[test]
fn removing_the_last_pair_leaves_the_board_stuck() {
    let mut world = world_with(strip());
    let _ = select(&mut world, 0);
    let events = select(&mut world, 1);

    assert_eq!(
        events,
        vec![
            Event::PairRemoved {
                pair: MatchPair::new(TileId::new(0), TileId::new(1)),
            },
            Event::GameStuck { remaining: 2 },
        ]
    );
    assert!(query::is_stuck(&world));
    assert_eq!(query::matches_made(&world), 1);
    assert_eq!(run(&mut world, Command::RequestHint), vec![Event::HintUnavailable]);

    assert_eq!(
        select(&mut world, 0),
        vec![Event::SelectionRejected {
            tile: TileId::new(0),
            reason: SelectionRejection::AlreadyRemoved,
        }]
    );
}

#[test]
fn undo_walks_back_through_shuffles_and_removals() {
    let mut world = world_with(strip());
    let _ = select(&mut world, 0);
    let _ = select(&mut world, 1);

    let events = run(&mut world, Command::Shuffle);
    assert_eq!(events, vec![Event::BoardShuffled { fallback: true }]);
    assert!(query::used_fallback(&world));
    assert_eq!(query::history_depth(&world), 2);

    assert_eq!(run(&mut world, Command::Undo), vec![Event::MoveUndone]);
    assert!(query::is_stuck(&world));

    assert_eq!(run(&mut world, Command::Undo), vec![Event::MoveUndone]);
    assert_eq!(query::status(&world), GameStatus::InProgress);
    assert_eq!(query::tiles(&world), strip().as_slice());
    assert_eq!(query::matches_made(&world), 0);

    assert!(run(&mut world, Command::Undo).is_empty());
}

#[test]
fn hint_is_cleared_by_the_next_move() {
    let mut world = world_with(strip());
    let pair = MatchPair::new(TileId::new(0), TileId::new(1));
    assert_eq!(run(&mut world, Command::RequestHint), vec![Event::HintRevealed { pair }]);
    assert_eq!(query::hint(&world), Some(pair));

    let _ = select(&mut world, 0);
    let _ = select(&mut world, 1);
    assert_eq!(query::hint(&world), None);
}

#[test]
fn following_the_deal_solution_wins_the_game() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut ids = TileIdAllocator::new();
    let generation = generate_board(
        LayoutId::Turtle,
        &mut rng,
        &GenerationTuning::default(),
        &mut ids,
    );
    let solution = generation.solution().expect("turtle deals are solvable").to_vec();
    let mut world = World::from_board(generation.into_board(), GenerationTuning::default(), 8);

    let mut log = Vec::new();
    for pair in &solution {
        log.extend(run(&mut world, Command::Tick { dt: Duration::from_millis(250) }));
        log.extend(select(&mut world, pair.first.get()));
        log.extend(select(&mut world, pair.second.get()));
    }

    assert!(!log.iter().any(|event| matches!(event, Event::GameStuck { .. })));
    assert!(!log.iter().any(|event| matches!(event, Event::SelectionRejected { .. })));
    assert_eq!(
        log.last(),
        Some(&Event::GameWon {
            elapsed: Duration::from_millis(250 * 72)
        })
    );
    assert!(query::is_complete(&world));
    assert_eq!(query::matches_made(&world), 72);
    assert_eq!(
        select(&mut world, 0),
        vec![Event::SelectionRejected {
            tile: TileId::new(0),
            reason: SelectionRejection::GameOver,
        }]
    );
}
