#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Catalog of the built-in board layouts.
//!
//! Layouts are generated once, validated, and shared for the lifetime of the
//! process. Each is a fixed sequence of [`GridPoint`] slots; capstones sit on
//! half-cell offsets between the tiles they cover.

use std::ops::RangeInclusive;

use mahjong_solitaire_core::{GridPoint, Layout, LayoutId};
use once_cell::sync::Lazy;

static CATALOG: Lazy<Vec<Layout>> = Lazy::new(|| {
    LayoutId::ALL
        .into_iter()
        .map(|id| build(id).expect("built-in layouts satisfy layout validation"))
        .collect()
});

/// Every built-in layout in menu order.
#[must_use]
pub fn catalog() -> &'static [Layout] {
    &CATALOG
}

/// Looks up a layout by identifier.
#[must_use]
pub fn layout(id: LayoutId) -> &'static Layout {
    // `LayoutId::ALL` lists the variants in declaration order.
    &CATALOG[id as usize]
}

/// Looks up a layout by its textual identifier, returning `None` when unknown.
#[must_use]
pub fn layout_by_name(name: &str) -> Option<&'static Layout> {
    LayoutId::parse(name).map(layout)
}

fn build(id: LayoutId) -> Result<Layout, mahjong_solitaire_core::LayoutError> {
    match id {
        LayoutId::Turtle => Layout::new(
            id,
            "Turtle",
            "The classic pyramid shell with side wings and a single capstone.",
            turtle(),
        ),
        LayoutId::Pyramid => Layout::new(
            id,
            "Pyramid",
            "Four stepped square layers narrowing toward the peak.",
            pyramid(),
        ),
        LayoutId::Dragon => Layout::new(
            id,
            "Dragon",
            "A long body with a raised spine and a head at each end.",
            dragon(),
        ),
        LayoutId::Fortress => Layout::new(
            id,
            "Fortress",
            "Double walls around a courtyard keep, guarded by corner towers.",
            fortress(),
        ),
        LayoutId::Bridge => Layout::new(
            id,
            "Bridge",
            "Two stacked piers joined by a deck that spans the river.",
            bridge(),
        ),
    }
}

/// Accumulates positions layer by layer.
#[derive(Default)]
struct Shape {
    positions: Vec<GridPoint>,
}

impl Shape {
    fn row(&mut self, y: f32, columns: RangeInclusive<i32>, z: u8) -> &mut Self {
        for x in columns {
            self.positions.push(GridPoint::new(x as f32, y, z));
        }
        self
    }

    fn rect(
        &mut self,
        columns: RangeInclusive<i32>,
        rows: RangeInclusive<i32>,
        z: u8,
    ) -> &mut Self {
        for y in rows {
            let _ = self.row(y as f32, columns.clone(), z);
        }
        self
    }

    fn point(&mut self, x: f32, y: f32, z: u8) -> &mut Self {
        self.positions.push(GridPoint::new(x, y, z));
        self
    }

    fn finish(&mut self) -> Vec<GridPoint> {
        std::mem::take(&mut self.positions)
    }
}

fn turtle() -> Vec<GridPoint> {
    let mut shape = Shape::default();
    let _ = shape
        .row(0.0, 1..=12, 0)
        .row(1.0, 3..=10, 0)
        .row(2.0, 2..=11, 0)
        .row(3.0, 1..=12, 0)
        .row(4.0, 1..=12, 0)
        .row(5.0, 2..=11, 0)
        .row(6.0, 3..=10, 0)
        .row(7.0, 1..=12, 0)
        .point(0.0, 3.5, 0)
        .point(13.0, 3.5, 0)
        .point(14.0, 3.5, 0)
        .rect(4..=9, 1..=6, 1)
        .rect(5..=8, 2..=5, 2)
        .rect(6..=7, 3..=4, 3)
        .point(6.5, 3.5, 4);
    shape.finish()
}

fn pyramid() -> Vec<GridPoint> {
    let mut shape = Shape::default();
    let _ = shape
        .rect(0..=7, 0..=7, 0)
        .rect(1..=6, 1..=6, 1)
        .rect(2..=5, 2..=5, 2)
        .rect(3..=4, 3..=4, 3);
    shape.finish()
}

fn dragon() -> Vec<GridPoint> {
    let mut shape = Shape::default();
    let _ = shape
        .row(0.0, 2..=13, 0)
        .rect(0..=15, 1..=3, 0)
        .row(4.0, 2..=13, 0)
        .point(-1.0, 2.0, 0)
        .point(16.0, 2.0, 0)
        .rect(2..=13, 1..=3, 1)
        .rect(4..=11, 1..=3, 2)
        .row(2.0, 5..=10, 3)
        .row(2.0, 7..=8, 4);
    shape.finish()
}

fn fortress() -> Vec<GridPoint> {
    let mut shape = Shape::default();
    for z in 0..=1 {
        let _ = shape
            .row(0.0, 0..=11, z)
            .row(7.0, 0..=11, z)
            .rect(0..=0, 1..=6, z)
            .rect(11..=11, 1..=6, z);
    }
    let _ = shape
        .rect(3..=8, 3..=4, 0)
        .rect(4..=7, 3..=4, 1)
        .rect(5..=6, 3..=4, 2);
    for z in 2..=3 {
        let _ = shape
            .point(0.0, 0.0, z)
            .point(11.0, 0.0, z)
            .point(0.0, 7.0, z)
            .point(11.0, 7.0, z);
    }
    shape.finish()
}

fn bridge() -> Vec<GridPoint> {
    let mut shape = Shape::default();
    let _ = shape
        .rect(0..=3, 0..=5, 0)
        .rect(12..=15, 0..=5, 0)
        .rect(0..=15, 2..=3, 1)
        .rect(0..=3, 0..=1, 1)
        .rect(0..=3, 4..=5, 1)
        .rect(12..=15, 0..=1, 1)
        .rect(12..=15, 4..=5, 1)
        .rect(1..=2, 1..=4, 2)
        .rect(13..=14, 1..=4, 2)
        .point(1.5, 2.5, 3)
        .point(13.5, 2.5, 3);
    shape.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_rect_emits_rows_in_order() {
        let mut shape = Shape::default();
        let positions = shape.rect(0..=1, 0..=1, 2).finish();
        assert_eq!(
            positions,
            vec![
                GridPoint::new(0.0, 0.0, 2),
                GridPoint::new(1.0, 0.0, 2),
                GridPoint::new(0.0, 1.0, 2),
                GridPoint::new(1.0, 1.0, 2),
            ]
        );
    }

    #[test]
    fn every_builder_passes_validation() {
        for id in LayoutId::ALL {
            assert!(build(id).is_ok(), "{id} failed validation");
        }
    }
}
