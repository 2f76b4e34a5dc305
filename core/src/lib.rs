#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Mahjong Solitaire engine.
//!
//! This crate defines the tile catalog, board geometry and the message
//! surface that connects adapters with the authoritative world. Adapters
//! submit [`Command`] values describing player intent, the world executes
//! them via its `apply` entry point, and then broadcasts [`Event`] values.
//! Every other crate operates on the plain data defined here: systems take
//! tile snapshots and return new ones rather than mutating shared state.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod layout;
mod tiles;

pub use layout::{
    validate_positions, GridPoint, Layout, LayoutError, LayoutId, MAX_LAYOUT_POSITIONS,
    MIN_LAYOUT_POSITIONS,
};
pub use tiles::{
    bonus_types, standard_types, tile_type, tile_type_by_key, tiles_match, MatchGroup,
    TileCategory, TileColor, TileType, TileTypeId, COPIES_PER_STANDARD_TYPE, STANDARD_TYPE_COUNT,
    TILE_TYPES, TILE_TYPE_COUNT,
};

/// Unique identifier assigned to a tile instance on a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u32);

impl TileId {
    /// Creates a new tile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Hands out tile identifiers for one board construction.
///
/// Each game owns its allocator, so independent games and tests never share
/// a counter.
#[derive(Clone, Debug, Default)]
pub struct TileIdAllocator {
    next: u32,
}

impl TileIdAllocator {
    /// Creates an allocator whose first identifier is zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Creates an allocator that starts counting at `first`.
    #[must_use]
    pub const fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Returns the next unused identifier.
    pub fn allocate(&mut self) -> TileId {
        let id = TileId::new(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// One physical tile placed on the board.
///
/// Once `removed` is set the instance is inert: no predicate considers it,
/// but it stays in the collection for undo and win checks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileInstance {
    /// Identifier unique within the board.
    pub id: TileId,
    /// Face printed on the tile.
    pub kind: TileTypeId,
    /// Slot occupied by the tile.
    pub position: GridPoint,
    /// Whether the tile has been matched and taken off the board.
    pub removed: bool,
}

impl TileInstance {
    /// Creates a tile that is still on the board.
    #[must_use]
    pub const fn new(id: TileId, kind: TileTypeId, position: GridPoint) -> Self {
        Self {
            id,
            kind,
            position,
            removed: false,
        }
    }

    /// Whether the tile still takes part in play.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.removed
    }
}

/// Unordered pair of tiles that may be removed together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchPair {
    /// Tile discovered first.
    pub first: TileId,
    /// Tile discovered second.
    pub second: TileId,
}

impl MatchPair {
    /// Creates a pair from two tile identifiers.
    #[must_use]
    pub const fn new(first: TileId, second: TileId) -> Self {
        Self { first, second }
    }

    /// Whether the pair names the provided tile.
    #[must_use]
    pub fn contains(&self, tile: TileId) -> bool {
        self.first == tile || self.second == tile
    }
}

/// Tiles of one game together with the layout they were dealt onto.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameBoard {
    /// Layout the board was generated from.
    pub layout: LayoutId,
    /// Every tile of the game, removed ones included.
    pub tiles: Vec<TileInstance>,
}

impl GameBoard {
    /// Creates a board from its tiles.
    #[must_use]
    pub fn new(layout: LayoutId, tiles: Vec<TileInstance>) -> Self {
        Self { layout, tiles }
    }

    /// Number of tiles still on the board.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_active()).count()
    }

    /// Finds a tile by identifier.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&TileInstance> {
        self.tiles.iter().find(|tile| tile.id == id)
    }
}

/// Commands that express all permissible game mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Discards the current game and deals a new board.
    NewGame {
        /// Layout to deal onto.
        layout: LayoutId,
        /// Seed for every random decision of the new game.
        seed: u64,
    },
    /// Player clicked a tile.
    SelectTile {
        /// Tile that was clicked.
        tile: TileId,
    },
    /// Reassigns the faces of the remaining tiles.
    Shuffle,
    /// Restores the board as it was before the last move.
    Undo,
    /// Asks for a removable pair to be pointed out.
    RequestHint,
    /// Advances the game clock.
    Tick {
        /// Duration that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A new board was dealt.
    GameStarted {
        /// Layout of the new board.
        layout: LayoutId,
        /// Number of tiles dealt.
        tiles: usize,
        /// Set when the deal could not be proven solvable.
        fallback: bool,
    },
    /// A tile became the current selection.
    TileSelected {
        /// Tile that is now selected.
        tile: TileId,
    },
    /// The current selection was dropped.
    SelectionCleared,
    /// A click was ignored.
    SelectionRejected {
        /// Tile that was clicked.
        tile: TileId,
        /// Reason the click had no effect.
        reason: SelectionRejection,
    },
    /// Two matching tiles left the board.
    PairRemoved {
        /// Tiles that were removed.
        pair: MatchPair,
    },
    /// Faces of the remaining tiles were reassigned.
    BoardShuffled {
        /// Set when the shuffle could not be proven solvable.
        fallback: bool,
    },
    /// The previous board snapshot was restored.
    MoveUndone,
    /// A removable pair was found for the player.
    HintRevealed {
        /// Pair that may be removed next.
        pair: MatchPair,
    },
    /// No removable pair exists.
    HintUnavailable,
    /// Every tile has been removed.
    GameWon {
        /// Simulated time spent on the game.
        elapsed: Duration,
    },
    /// Tiles remain but none of them can be matched.
    GameStuck {
        /// Number of tiles left on the board.
        remaining: usize,
    },
}

/// Reasons a tile click is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionRejection {
    /// No tile with the identifier exists on the board.
    UnknownTile,
    /// The tile was already matched.
    AlreadyRemoved,
    /// The tile is covered or hemmed in on both sides.
    Blocked,
    /// The game is over.
    GameOver,
}
