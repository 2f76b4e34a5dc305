use mahjong_solitaire_core::{tile_type_by_key, GridPoint, MatchPair, TileId, TileInstance};
use mahjong_solitaire_system_matching::{check_stuck, check_win, find_all_matches, get_hint};

fn tile(id: u32, key: &str, x: f32, y: f32, z: u8) -> TileInstance {
    let kind = tile_type_by_key(key).expect("catalog key").id;
    TileInstance::new(TileId::new(id), kind, GridPoint::new(x, y, z))
}

fn pair(first: u32, second: u32) -> MatchPair {
    MatchPair::new(TileId::new(first), TileId::new(second))
}

#[test]
fn matches_are_reported_in_discovery_order() {
    let tiles = vec![
        tile(0, "circle-1", 0.0, 0.0, 0),
        tile(1, "bamboo-2", 0.0, 2.0, 0),
        tile(2, "circle-1", 0.0, 4.0, 0),
        tile(3, "bamboo-2", 0.0, 6.0, 0),
        tile(4, "circle-1", 0.0, 8.0, 0),
    ];

    assert_eq!(
        find_all_matches(&tiles),
        vec![pair(0, 2), pair(0, 4), pair(1, 3), pair(2, 4)]
    );
    assert_eq!(get_hint(&tiles), Some(pair(0, 2)));
}

#[test]
fn blocked_tiles_are_excluded_from_matches() {
    let tiles = vec![
        tile(0, "dragon-red", 0.0, 0.0, 0),
        tile(1, "dragon-red", 1.0, 0.0, 0),
        tile(2, "wind-east", 2.0, 0.0, 0),
        tile(3, "dragon-red", 5.0, 5.0, 0),
        tile(4, "circle-9", 5.0, 5.0, 1),
    ];

    // Tile 1 is hemmed in, tile 3 is covered.
    assert_eq!(find_all_matches(&tiles), Vec::<MatchPair>::new());
    assert!(check_stuck(&tiles));
}

#[test]
fn bonus_tiles_match_within_their_group_only() {
    let tiles = vec![
        tile(0, "season-spring", 0.0, 0.0, 0),
        tile(1, "flower-plum", 0.0, 2.0, 0),
        tile(2, "season-autumn", 0.0, 4.0, 0),
        tile(3, "flower-orchid", 0.0, 6.0, 0),
    ];

    assert_eq!(find_all_matches(&tiles), vec![pair(0, 2), pair(1, 3)]);
}

#[test]
fn removed_tiles_do_not_match() {
    let mut tiles = vec![
        tile(0, "character-9", 0.0, 0.0, 0),
        tile(1, "character-9", 0.0, 2.0, 0),
    ];
    tiles[1].removed = true;
    assert!(find_all_matches(&tiles).is_empty());
    assert!(check_stuck(&tiles));
}

#[test]
fn win_and_stuck_are_mutually_exclusive() {
    let mut tiles = vec![
        tile(0, "circle-5", 0.0, 0.0, 0),
        tile(1, "circle-5", 3.0, 0.0, 0),
    ];
    assert!(!check_win(&tiles));
    assert!(!check_stuck(&tiles));

    for entry in &mut tiles {
        entry.removed = true;
    }
    assert!(check_win(&tiles));
    assert!(!check_stuck(&tiles));
}
