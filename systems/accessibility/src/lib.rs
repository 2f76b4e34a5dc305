#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure predicates deciding which tiles a player may select.
//!
//! A tile is free when nothing rests on top of it and at least one of its
//! sides on its own layer is open. The same rule is exposed for bare
//! positions so the board generator can evaluate it against the set of slots
//! it has filled so far.

use mahjong_solitaire_core::{GridPoint, TileInstance};

/// Largest offset on either axis at which two slots still count as the same
/// cell (covering) or the same row (side blocking).
pub const OVERLAP_TOLERANCE: f32 = 0.9;

/// Largest horizontal distance at which a neighbour blocks a side.
pub const SIDE_REACH: f32 = 1.1;

/// Whether `upper` rests on top of `lower`.
#[must_use]
pub fn covers(upper: &GridPoint, lower: &GridPoint) -> bool {
    upper.z > lower.z
        && (upper.x - lower.x).abs() < OVERLAP_TOLERANCE
        && (upper.y - lower.y).abs() < OVERLAP_TOLERANCE
}

/// Whether `neighbor` hems in the left side of `point`.
#[must_use]
pub fn blocks_left(neighbor: &GridPoint, point: &GridPoint) -> bool {
    let gap = point.x - neighbor.x;
    shares_row(neighbor, point) && gap > 0.0 && gap <= SIDE_REACH
}

/// Whether `neighbor` hems in the right side of `point`.
#[must_use]
pub fn blocks_right(neighbor: &GridPoint, point: &GridPoint) -> bool {
    let gap = neighbor.x - point.x;
    shares_row(neighbor, point) && gap > 0.0 && gap <= SIDE_REACH
}

fn shares_row(a: &GridPoint, b: &GridPoint) -> bool {
    a.z == b.z && (a.y - b.y).abs() < OVERLAP_TOLERANCE
}

/// Evaluates the free-tile rule for a bare position.
///
/// `occupied` lists every other filled slot; entries at the same coordinates
/// as `point` are ignored.
#[must_use]
pub fn is_exposed<'a, I>(point: &GridPoint, occupied: I) -> bool
where
    I: IntoIterator<Item = &'a GridPoint>,
{
    let mut left_blocked = false;
    let mut right_blocked = false;

    for other in occupied {
        if other.half_units() == point.half_units() {
            continue;
        }
        if covers(other, point) {
            return false;
        }
        left_blocked |= blocks_left(other, point);
        right_blocked |= blocks_right(other, point);
    }

    !(left_blocked && right_blocked)
}

/// Reports whether `tile` may currently be selected.
///
/// Removed tiles are never free, and removed entries of `tiles` never block.
#[must_use]
pub fn is_free_tile(tile: &TileInstance, tiles: &[TileInstance]) -> bool {
    if tile.removed {
        return false;
    }

    is_exposed(
        &tile.position,
        tiles
            .iter()
            .filter(|other| other.is_active() && other.id != tile.id)
            .map(|other| &other.position),
    )
}

/// Collects the tiles that may currently be selected, in collection order.
#[must_use]
pub fn free_tiles(tiles: &[TileInstance]) -> Vec<&TileInstance> {
    tiles
        .iter()
        .filter(|tile| is_free_tile(tile, tiles))
        .collect()
}
