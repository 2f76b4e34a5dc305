#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enumerates removable pairs and derives the terminal state of a board.

use mahjong_solitaire_core::{tiles_match, MatchPair, TileInstance};
use mahjong_solitaire_system_accessibility::free_tiles;

/// Lists every pair of free tiles whose faces match.
///
/// The free subset is computed first so the pair scan costs O(F²) in the
/// number of free tiles instead of O(N²) over the whole board. Pairs are
/// returned in discovery order: outer index first, then inner index.
#[must_use]
pub fn find_all_matches(tiles: &[TileInstance]) -> Vec<MatchPair> {
    let free = free_tiles(tiles);
    let mut pairs = Vec::new();

    for (index, first) in free.iter().enumerate() {
        for second in &free[index + 1..] {
            if tiles_match(first.kind, second.kind) {
                pairs.push(MatchPair::new(first.id, second.id));
            }
        }
    }

    pairs
}

/// Whether every tile has been removed.
#[must_use]
pub fn check_win(tiles: &[TileInstance]) -> bool {
    tiles.iter().all(|tile| tile.removed)
}

/// Whether tiles remain but no pair can be removed.
#[must_use]
pub fn check_stuck(tiles: &[TileInstance]) -> bool {
    !check_win(tiles) && find_all_matches(tiles).is_empty()
}

/// First removable pair in discovery order, if any.
#[must_use]
pub fn get_hint(tiles: &[TileInstance]) -> Option<MatchPair> {
    find_all_matches(tiles).into_iter().next()
}
