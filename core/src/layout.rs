//! Board geometry: grid points, layout identifiers and validated layouts.

use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest number of positions a layout may declare.
pub const MAX_LAYOUT_POSITIONS: usize = 144;

/// Smallest number of positions a playable layout may declare.
pub const MIN_LAYOUT_POSITIONS: usize = 4;

/// Location of a tile slot. `x` and `y` may sit on half-cell offsets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    /// Column measured in tile widths.
    pub x: f32,
    /// Row measured in tile heights.
    pub y: f32,
    /// Stacking layer, zero being the table.
    pub z: u8,
}

impl GridPoint {
    /// Creates a new grid point.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Row identity used for same-row checks: `y` rounded to tenths.
    #[must_use]
    pub fn row_key(&self) -> i32 {
        (self.y * 10.0).round() as i32
    }

    /// Exact integer key in half-cell units, used for duplicate detection.
    #[must_use]
    pub fn half_units(&self) -> (i32, i32, u8) {
        ((self.x * 2.0).round() as i32, (self.y * 2.0).round() as i32, self.z)
    }

    fn is_on_half_grid(&self) -> bool {
        let on_grid = |value: f32| ((value * 2.0) - (value * 2.0).round()).abs() < 1e-3;
        self.x.is_finite() && self.y.is_finite() && on_grid(self.x) && on_grid(self.y)
    }
}

/// Identifier of a built-in board layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LayoutId {
    /// Classic 144-tile turtle.
    Turtle,
    /// Stepped square pyramid.
    Pyramid,
    /// Long serpent with a raised spine.
    Dragon,
    /// Walled fortress with corner towers.
    Fortress,
    /// Two piers joined by a raised deck.
    Bridge,
}

impl LayoutId {
    /// Every built-in layout in menu order.
    pub const ALL: [LayoutId; 5] = [
        LayoutId::Turtle,
        LayoutId::Pyramid,
        LayoutId::Dragon,
        LayoutId::Fortress,
        LayoutId::Bridge,
    ];

    /// Stable textual identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Turtle => "turtle",
            Self::Pyramid => "pyramid",
            Self::Dragon => "dragon",
            Self::Fortress => "fortress",
            Self::Bridge => "bridge",
        }
    }

    /// Parses a textual identifier, returning `None` when unknown.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutId {
    type Err = LayoutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| LayoutError::UnknownLayout(value.to_owned()))
    }
}

/// Reasons a layout description is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LayoutError {
    /// Fewer positions than a game of two pairs requires.
    #[error("layout declares {count} positions; at least {} are required", MIN_LAYOUT_POSITIONS)]
    TooFewPositions {
        /// Number of positions declared.
        count: usize,
    },
    /// More positions than the deck has tiles.
    #[error("layout declares {count} positions; at most {} are supported", MAX_LAYOUT_POSITIONS)]
    TooManyPositions {
        /// Number of positions declared.
        count: usize,
    },
    /// Tiles are removed in pairs, so an odd slot could never be cleared.
    #[error("layout declares an odd number of positions ({count})")]
    OddPositionCount {
        /// Number of positions declared.
        count: usize,
    },
    /// Two positions share the same coordinates.
    #[error("position {0:?} appears more than once")]
    DuplicatePosition(GridPoint),
    /// A coordinate is not a multiple of half a cell.
    #[error("position {0:?} is not aligned to the half-cell grid")]
    OffGrid(GridPoint),
    /// No built-in layout carries the requested identifier.
    #[error("unknown layout '{0}'")]
    UnknownLayout(String),
}

/// Named, validated set of tile positions.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    id: LayoutId,
    name: &'static str,
    description: &'static str,
    positions: Vec<GridPoint>,
}

impl Layout {
    /// Validates the positions and builds a layout.
    pub fn new(
        id: LayoutId,
        name: &'static str,
        description: &'static str,
        positions: Vec<GridPoint>,
    ) -> Result<Self, LayoutError> {
        validate_positions(&positions)?;
        Ok(Self {
            id,
            name,
            description,
            positions,
        })
    }

    /// Identifier of the layout.
    #[must_use]
    pub const fn id(&self) -> LayoutId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// One-line description for selection menus.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Ordered tile positions.
    #[must_use]
    pub fn positions(&self) -> &[GridPoint] {
        &self.positions
    }

    /// Number of tiles a board built from this layout holds.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.positions.len()
    }
}

/// Checks the invariants every playable position set must satisfy.
pub fn validate_positions(positions: &[GridPoint]) -> Result<(), LayoutError> {
    let count = positions.len();
    if count < MIN_LAYOUT_POSITIONS {
        return Err(LayoutError::TooFewPositions { count });
    }
    if count > MAX_LAYOUT_POSITIONS {
        return Err(LayoutError::TooManyPositions { count });
    }
    if count % 2 != 0 {
        return Err(LayoutError::OddPositionCount { count });
    }

    let mut seen = HashSet::with_capacity(count);
    for point in positions {
        if !point.is_on_half_grid() {
            return Err(LayoutError::OffGrid(*point));
        }
        if !seen.insert(point.half_units()) {
            return Err(LayoutError::DuplicatePosition(*point));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(count: usize) -> Vec<GridPoint> {
        (0..count).map(|x| GridPoint::new(x as f32, 0.0, 0)).collect()
    }

    #[test]
    fn accepts_even_row() {
        assert!(validate_positions(&row(4)).is_ok());
    }

    #[test]
    fn rejects_short_layout() {
        assert_eq!(
            validate_positions(&row(2)),
            Err(LayoutError::TooFewPositions { count: 2 })
        );
    }

    #[test]
    fn rejects_oversized_layout() {
        assert_eq!(
            validate_positions(&row(146)),
            Err(LayoutError::TooManyPositions { count: 146 })
        );
    }

    #[test]
    fn rejects_odd_layout() {
        assert_eq!(
            validate_positions(&row(5)),
            Err(LayoutError::OddPositionCount { count: 5 })
        );
    }

    #[test]
    fn rejects_duplicates() {
        let mut positions = row(3);
        positions.push(GridPoint::new(1.0, 0.0, 0));
        assert_eq!(
            validate_positions(&positions),
            Err(LayoutError::DuplicatePosition(GridPoint::new(1.0, 0.0, 0)))
        );
    }

    #[test]
    fn rejects_quarter_offsets() {
        let mut positions = row(3);
        positions.push(GridPoint::new(5.25, 0.0, 0));
        assert!(matches!(
            validate_positions(&positions),
            Err(LayoutError::OffGrid(_))
        ));
    }

    #[test]
    fn half_offsets_are_distinct_from_whole_cells() {
        let positions = vec![
            GridPoint::new(0.0, 3.0, 0),
            GridPoint::new(0.0, 3.5, 1),
            GridPoint::new(0.5, 3.5, 0),
            GridPoint::new(0.0, 4.0, 0),
        ];
        assert!(validate_positions(&positions).is_ok());
    }

    #[test]
    fn row_key_rounds_to_tenths() {
        assert_eq!(GridPoint::new(0.0, 3.5, 0).row_key(), 35);
        assert_eq!(GridPoint::new(0.0, 3.49999, 2).row_key(), 35);
    }

    #[test]
    fn layout_ids_parse_case_insensitively() {
        assert_eq!(LayoutId::parse("Turtle"), Some(LayoutId::Turtle));
        assert_eq!(LayoutId::parse("bridge"), Some(LayoutId::Bridge));
        assert_eq!(LayoutId::parse("spiral"), None);
        assert!(matches!(
            "spiral".parse::<LayoutId>(),
            Err(LayoutError::UnknownLayout(_))
        ));
    }
}
