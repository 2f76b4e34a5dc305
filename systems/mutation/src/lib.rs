#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure board transformations triggered by player moves.
//!
//! Every operation takes a snapshot and returns a new one, leaving the input
//! untouched so callers can keep prior snapshots for undo.

use mahjong_solitaire_core::{GameBoard, GridPoint, MatchPair, TileId, TileInstance};
use mahjong_solitaire_system_generation::{construct_pairs, pair_faces, GenerationTuning};
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, warn};

/// Result of reshuffling the remaining tiles.
#[derive(Clone, Debug, PartialEq)]
pub enum Shuffle {
    /// The reshuffled board is known to be clearable.
    Solvable {
        /// Reshuffled board.
        board: GameBoard,
        /// Removal order that clears the remaining tiles.
        solution: Vec<MatchPair>,
        /// Construction runs used, counting the successful one.
        attempts: u32,
    },
    /// Faces were permuted without a solvability guarantee.
    Fallback {
        /// Reshuffled board.
        board: GameBoard,
        /// Construction runs tried before giving up.
        attempts: u32,
    },
}

impl Shuffle {
    /// Borrows the reshuffled board.
    #[must_use]
    pub fn board(&self) -> &GameBoard {
        match self {
            Self::Solvable { board, .. } | Self::Fallback { board, .. } => board,
        }
    }

    /// Takes ownership of the reshuffled board.
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

/// Marks both tiles as removed and returns the new collection.
///
/// Unknown identifiers and tiles that are already removed are ignored, so
/// repeating a call yields the same collection.
#[must_use]
pub fn remove_tile_pair(
    tiles: &[TileInstance],
    first: TileId,
    second: TileId,
) -> Vec<TileInstance> {
    tiles
        .iter()
        .map(|tile| {
            let mut tile = *tile;
            if tile.id == first || tile.id == second {
                tile.removed = true;
            }
            tile
        })
        .collect()
}

/// Reassigns the faces of the remaining tiles.
///
/// Faces are regrouped into matching pairs and dealt again through reverse
/// construction over the occupied positions, never placing both faces of a
/// pair in the same row of the same layer. Removed tiles keep their face and
/// flag. When no run completes within `tuning.shuffle_attempts`, or the
/// remaining faces cannot be paired at all, the faces are simply permuted.
pub fn shuffle_board<R>(board: &GameBoard, rng: &mut R, tuning: &GenerationTuning) -> Shuffle
where
    R: Rng + ?Sized,
{
    let active: Vec<usize> = board
        .tiles
        .iter()
        .enumerate()
        .filter(|(_, tile)| tile.is_active())
        .map(|(index, _)| index)
        .collect();
    if active.is_empty() {
        return Shuffle::Solvable {
            board: board.clone(),
            solution: Vec::new(),
            attempts: 0,
        };
    }

    let points: Vec<GridPoint> = active
        .iter()
        .map(|&index| board.tiles[index].position)
        .collect();
    let kinds: Vec<_> = active.iter().map(|&index| board.tiles[index].kind).collect();

    let mut tried = 0;
    if let Some(mut faces) = pair_faces(&kinds) {
        for attempt in 1..=tuning.shuffle_attempts {
            tried = attempt;
            let Some(order) = construct_pairs(&points, rng, separated) else {
                debug!(attempt, remaining = active.len(), "shuffle construction stalled");
                continue;
            };

            faces.shuffle(rng);
            let mut tiles = board.tiles.clone();
            for ([first, second], [face_a, face_b]) in order.iter().zip(&faces) {
                tiles[active[*first]].kind = *face_a;
                tiles[active[*second]].kind = *face_b;
            }
            let solution = order
                .iter()
                .rev()
                .map(|[first, second]| {
                    MatchPair::new(tiles[active[*first]].id, tiles[active[*second]].id)
                })
                .collect();

            debug!(attempt, remaining = active.len(), "reshuffled board");
            return Shuffle::Solvable {
                board: GameBoard::new(board.layout, tiles),
                solution,
                attempts: attempt,
            };
        }
    }

    warn!(
        attempts = tried,
        remaining = active.len(),
        "shuffle could not be proven solvable, permuting faces"
    );
    let mut kinds = kinds;
    kinds.shuffle(rng);
    let mut tiles = board.tiles.clone();
    for (index, kind) in active.iter().zip(kinds) {
        tiles[*index].kind = kind;
    }
    Shuffle::Fallback {
        board: GameBoard::new(board.layout, tiles),
        attempts: tried,
    }
}

/// Both faces of a reshuffled pair land at least a row or a layer apart.
fn separated(first: &GridPoint, second: &GridPoint) -> bool {
    (first.y - second.y).abs() >= 1.0 || first.z != second.z
}

/// Restores the snapshot taken before the last move.
///
/// The caller owns the history stack: it pushes a snapshot before every
/// mutating move and pops one to undo it.
#[must_use]
pub fn undo_move(current: &[TileInstance], previous: &[TileInstance]) -> Vec<TileInstance> {
    let restored = previous.iter().filter(|tile| tile.is_active()).count();
    let remaining = current.iter().filter(|tile| tile.is_active()).count();
    debug!(restored = restored.saturating_sub(remaining), "undoing move");
    previous.to_vec()
}
