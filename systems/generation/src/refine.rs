//! Presentation pass that breaks up identical faces sharing a row.
//!
//! Faces are only ever exchanged between whole constructed pairs, so every
//! pair still holds two matching faces and the removal order found during
//! construction remains valid.

use std::collections::{BTreeMap, BTreeSet};

use mahjong_solitaire_core::{GridPoint, TileTypeId};

/// Reassigns faces between constructed pairs until no row repeats a face, or
/// until no remaining repeat can be repaired.
///
/// `pairs` lists constructed slot pairs and `kinds` holds the face of every
/// slot. A repeat at slot `p` is repaired by swapping faces with a pair that
/// owns a slot on the same layer, in another row, carrying a different face.
/// A swap is kept only if it lowers the total repeats of the rows it touches
/// and none of those rows ends up with more repeats than before.
pub(crate) fn refine_same_rows(
    points: &[GridPoint],
    pairs: &[[usize; 2]],
    kinds: &mut [TileTypeId],
) {
    let mut pair_of = vec![0; points.len()];
    for (index, pair) in pairs.iter().enumerate() {
        for &slot in pair {
            pair_of[slot] = index;
        }
    }

    let mut unrepairable = BTreeSet::new();
    while let Some(slot) = next_repeat(points, kinds, &unrepairable) {
        if !repair(points, pairs, &pair_of, kinds, slot) {
            let _ = unrepairable.insert(slot);
        }
    }
}

/// Finds the first slot whose face already appeared earlier in its row.
fn next_repeat(
    points: &[GridPoint],
    kinds: &[TileTypeId],
    skip: &BTreeSet<usize>,
) -> Option<usize> {
    for slots in rows(points).values() {
        let mut seen = BTreeSet::new();
        for &slot in slots {
            if !seen.insert(kinds[slot]) && !skip.contains(&slot) {
                return Some(slot);
            }
        }
    }
    None
}

fn repair(
    points: &[GridPoint],
    pairs: &[[usize; 2]],
    pair_of: &[usize],
    kinds: &mut [TileTypeId],
    slot: usize,
) -> bool {
    let own = pair_of[slot];
    let here = points[slot];

    for other in 0..points.len() {
        let there = points[other];
        if pair_of[other] == own
            || there.z != here.z
            || there.row_key() == here.row_key()
            || kinds[other] == kinds[slot]
        {
            continue;
        }

        let swap = Swap::aligning(pairs[own], slot, pairs[pair_of[other]], other);
        let touched = swap.rows(points);
        let before = repeats_by_row(points, kinds, &touched);
        swap.apply(kinds);
        if improves(&before, &repeats_by_row(points, kinds, &touched)) {
            return true;
        }
        swap.apply(kinds);
    }
    false
}

/// Exchange of faces between two pairs, slot by slot.
struct Swap {
    links: [(usize, usize); 2],
}

impl Swap {
    /// Pairs `slot` with `other` and the two partners with each other.
    fn aligning(own: [usize; 2], slot: usize, theirs: [usize; 2], other: usize) -> Self {
        let own_partner = if own[0] == slot { own[1] } else { own[0] };
        let their_partner = if theirs[0] == other { theirs[1] } else { theirs[0] };
        Self {
            links: [(slot, other), (own_partner, their_partner)],
        }
    }

    /// Applying a swap twice restores the original faces.
    fn apply(&self, kinds: &mut [TileTypeId]) {
        for &(a, b) in &self.links {
            kinds.swap(a, b);
        }
    }

    fn rows(&self, points: &[GridPoint]) -> BTreeSet<i32> {
        self.links
            .iter()
            .flat_map(|&(a, b)| [points[a].row_key(), points[b].row_key()])
            .collect()
    }
}

fn rows(points: &[GridPoint]) -> BTreeMap<i32, Vec<usize>> {
    let mut rows: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (slot, point) in points.iter().enumerate() {
        rows.entry(point.row_key()).or_default().push(slot);
    }
    rows
}

/// Number of faces repeated within each of the given rows.
fn repeats_by_row(
    points: &[GridPoint],
    kinds: &[TileTypeId],
    touched: &BTreeSet<i32>,
) -> BTreeMap<i32, usize> {
    let mut counts: BTreeMap<(i32, TileTypeId), usize> = BTreeMap::new();
    for (slot, point) in points.iter().enumerate() {
        let row = point.row_key();
        if touched.contains(&row) {
            *counts.entry((row, kinds[slot])).or_insert(0) += 1;
        }
    }

    let mut repeats: BTreeMap<i32, usize> = touched.iter().map(|&row| (row, 0)).collect();
    for (&(row, _), &count) in &counts {
        *repeats.entry(row).or_insert(0) += count - 1;
    }
    repeats
}

/// Fewer repeats overall, and no row worse off.
fn improves(before: &BTreeMap<i32, usize>, after: &BTreeMap<i32, usize>) -> bool {
    let no_row_worse = after
        .iter()
        .all(|(row, count)| before.get(row).is_some_and(|previous| count <= previous));
    no_row_worse && after.values().sum::<usize>() < before.values().sum::<usize>()
}

/// Total repeated faces over every row.
#[cfg(test)]
pub(crate) fn total_repeats(points: &[GridPoint], kinds: &[TileTypeId]) -> usize {
    repeats_per_row(points, kinds).values().sum()
}

#[cfg(test)]
fn repeats_per_row(points: &[GridPoint], kinds: &[TileTypeId]) -> BTreeMap<i32, usize> {
    let all: BTreeSet<i32> = points.iter().map(GridPoint::row_key).collect();
    repeats_by_row(points, kinds, &all)
}
