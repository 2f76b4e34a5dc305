#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deals tile faces onto a layout so that the board can be cleared.
//!
//! Dealing runs a randomized reverse construction over the layout's slots
//! (see [`construct_pairs`]), hands matching face pairs to the constructed
//! pairs and finally moves faces around so identical faces rarely share a
//! row. Construction may stall on awkward layouts, so it is retried a bounded
//! number of times before an unconstrained deal is returned instead. The
//! outcome says which path was taken.

mod construction;
mod pool;
mod refine;
mod tuning;

use std::cmp::Reverse;

use mahjong_solitaire_core::{
    GameBoard, GridPoint, Layout, LayoutId, MatchPair, TileIdAllocator, TileInstance, TileTypeId,
};
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, warn};

pub use construction::{construct_pairs, PlacementOrder};
pub use pool::{pair_faces, FacePair};
pub use tuning::GenerationTuning;

use crate::pool::deal_pairs;
use crate::refine::refine_same_rows;

/// Result of dealing a new board.
#[derive(Clone, Debug, PartialEq)]
pub enum Generation {
    /// Construction succeeded and the board is known to be clearable.
    Solvable {
        /// Dealt board.
        board: GameBoard,
        /// Removal order that clears the board.
        solution: Vec<MatchPair>,
        /// Construction runs used, counting the successful one.
        attempts: u32,
    },
    /// Every construction run stalled; faces were dealt without guarantees.
    Fallback {
        /// Dealt board.
        board: GameBoard,
        /// Construction runs tried before giving up.
        attempts: u32,
    },
}

impl Generation {
    /// Borrows the dealt board.
    #[must_use]
    pub fn board(&self) -> &GameBoard {
        match self {
            Self::Solvable { board, .. } | Self::Fallback { board, .. } => board,
        }
    }

    /// Takes ownership of the dealt board.
    #[must_use]
    pub fn into_board(self) -> GameBoard {
        match self {
            Self::Solvable { board, .. } | Self::Fallback { board, .. } => board,
        }
    }

    /// Whether the solvability guarantee was given up.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Removal order that clears the board, when one is known.
    #[must_use]
    pub fn solution(&self) -> Option<&[MatchPair]> {
        match self {
            Self::Solvable { solution, .. } => Some(solution),
            Self::Fallback { .. } => None,
        }
    }

    /// Number of construction runs spent.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Solvable { attempts, .. } | Self::Fallback { attempts, .. } => *attempts,
        }
    }
}

/// Deals a new board for one of the built-in layouts.
pub fn generate_board<R>(
    layout: LayoutId,
    rng: &mut R,
    tuning: &GenerationTuning,
    ids: &mut TileIdAllocator,
) -> Generation
where
    R: Rng + ?Sized,
{
    generate_layout(mahjong_solitaire_layouts::layout(layout), rng, tuning, ids)
}

/// Deals a new board for an arbitrary validated layout.
///
/// Tiles are created in layout order and receive fresh identifiers from
/// `ids`.
pub fn generate_layout<R>(
    layout: &Layout,
    rng: &mut R,
    tuning: &GenerationTuning,
    ids: &mut TileIdAllocator,
) -> Generation
where
    R: Rng + ?Sized,
{
    let points = layout.positions();

    for attempt in 1..=tuning.generation_attempts {
        let Some(order) = construct_pairs(points, rng, |_, _| true) else {
            debug!(layout = %layout.id(), attempt, "reverse construction stalled");
            continue;
        };

        let faces = deal_pairs(points.len(), rng);
        let mut kinds = vec![TileTypeId::new(0); points.len()];
        let ranked = dealing_order(points, &order);
        for ([first, second], [face_a, face_b]) in ranked.into_iter().zip(faces) {
            kinds[first] = face_a;
            kinds[second] = face_b;
        }
        if tuning.refine_same_rows {
            refine_same_rows(points, &order, &mut kinds);
        }

        let tiles = place(points, &kinds, ids);
        let solution = order
            .iter()
            .rev()
            .map(|[first, second]| MatchPair::new(tiles[*first].id, tiles[*second].id))
            .collect();

        debug!(layout = %layout.id(), attempt, tiles = tiles.len(), "dealt solvable board");
        return Generation::Solvable {
            board: GameBoard::new(layout.id(), tiles),
            solution,
            attempts: attempt,
        };
    }

    warn!(
        layout = %layout.id(),
        attempts = tuning.generation_attempts,
        "reverse construction never completed, dealing without a solvability guarantee"
    );
    let mut kinds: Vec<TileTypeId> =
        deal_pairs(points.len(), rng).into_iter().flatten().collect();
    kinds.shuffle(rng);
    Generation::Fallback {
        board: GameBoard::new(layout.id(), place(points, &kinds, ids)),
        attempts: tuning.generation_attempts,
    }
}

/// Constructed pairs ranked for dealing: highest layer first, then by row.
fn dealing_order(points: &[GridPoint], order: &[[usize; 2]]) -> PlacementOrder {
    let mut ranked = order.to_vec();
    ranked.sort_by_key(|[first, second]| {
        let layer = points[*first].z.max(points[*second].z);
        let row = points[*first].row_key().min(points[*second].row_key());
        (Reverse(layer), row)
    });
    ranked
}

fn place(
    points: &[GridPoint],
    kinds: &[TileTypeId],
    ids: &mut TileIdAllocator,
) -> Vec<TileInstance> {
    points
        .iter()
        .zip(kinds)
        .map(|(point, kind)| TileInstance::new(ids.allocate(), *kind, *point))
        .collect()
}
