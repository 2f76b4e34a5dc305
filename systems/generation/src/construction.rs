//! Reverse construction of a clearable pairing over a fixed set of slots.
//!
//! Play is simulated backwards: starting from an empty table, pairs of slots
//! are filled one pair at a time, and each slot must satisfy the free-tile
//! rule against the slots filled before it. Removing the pairs in the
//! opposite order therefore only ever removes free tiles.
//!
//! Two ordering constraints keep a run from stranding slots it can no longer
//! fill: a slot is filled only after every slot it rests on, and within each
//! side-connected segment of a layer slots fill outward from a randomly
//! chosen pivot column, so a slot's outer side is always still empty when it
//! is filled.

use mahjong_solitaire_core::GridPoint;
use mahjong_solitaire_system_accessibility::{blocks_left, blocks_right, covers, is_exposed};

use rand::{seq::SliceRandom, Rng};

const DISTANCE_EPSILON: f32 = 1e-3;

/// Placement order produced by a successful construction.
///
/// Pairs are listed in the order they were filled; reversing the list gives
/// a removal order that clears the board.
pub type PlacementOrder = Vec<[usize; 2]>;

/// Runs one randomized reverse construction over `points`.
///
/// `accept` may veto a candidate pair (first slot, second slot). Returns
/// `None` when the run stalls before every slot is filled; callers retry
/// with fresh randomness.
pub fn construct_pairs<R, F>(
    points: &[GridPoint],
    rng: &mut R,
    mut accept: F,
) -> Option<PlacementOrder>
where
    R: Rng + ?Sized,
    F: FnMut(&GridPoint, &GridPoint) -> bool,
{
    if points.len() < 2 || points.len() % 2 != 0 {
        return None;
    }

    let graph = SlotGraph::new(points);
    let distance = graph.pivot_distances(points, rng);
    let mut state = Occupancy {
        points,
        graph: &graph,
        distance: &distance,
        filled: vec![false; points.len()],
    };
    let mut order = Vec::with_capacity(points.len() / 2);

    while order.len() * 2 < points.len() {
        let mut candidates = state.placeable();
        if candidates.len() < 2 {
            return None;
        }
        candidates.shuffle(rng);

        let mut chosen = None;
        for &first in &candidates {
            state.filled[first] = true;
            let partners: Vec<usize> = state
                .placeable()
                .into_iter()
                .filter(|&second| accept(&points[first], &points[second]))
                .filter(|&second| state.stays_exposed(first, second))
                .collect();
            if let Some(&second) = partners.choose(rng) {
                chosen = Some([first, second]);
                break;
            }
            state.filled[first] = false;
        }

        let [first, second] = chosen?;
        state.filled[first] = true;
        state.filled[second] = true;
        order.push([first, second]);
    }

    Some(order)
}

/// Static adjacency facts about the slots, computed once per run.
struct SlotGraph {
    below: Vec<Vec<usize>>,
    segment: Vec<usize>,
    segments: Vec<Vec<usize>>,
}

impl SlotGraph {
    fn new(points: &[GridPoint]) -> Self {
        let count = points.len();
        let mut below = vec![Vec::new(); count];
        let mut parent: Vec<usize> = (0..count).collect();

        for upper in 0..count {
            for lower in 0..count {
                if upper == lower {
                    continue;
                }
                if covers(&points[upper], &points[lower]) {
                    below[upper].push(lower);
                }
                if blocks_left(&points[lower], &points[upper])
                    || blocks_right(&points[lower], &points[upper])
                {
                    union(&mut parent, upper, lower);
                }
            }
        }

        let mut segment = vec![0; count];
        let mut segments: Vec<Vec<usize>> = Vec::new();
        let mut roots: Vec<usize> = Vec::new();
        for slot in 0..count {
            let root = find(&mut parent, slot);
            let index = match roots.iter().position(|candidate| *candidate == root) {
                Some(index) => index,
                None => {
                    roots.push(root);
                    segments.push(Vec::new());
                    segments.len() - 1
                }
            };
            segment[slot] = index;
            segments[index].push(slot);
        }

        Self {
            below,
            segment,
            segments,
        }
    }

    /// Distance of every slot from a random pivot column of its segment.
    fn pivot_distances<R>(&self, points: &[GridPoint], rng: &mut R) -> Vec<f32>
    where
        R: Rng + ?Sized,
    {
        let pivots: Vec<f32> = self
            .segments
            .iter()
            .map(|members| members.choose(rng).map_or(0.0, |&slot| points[slot].x))
            .collect();

        points
            .iter()
            .enumerate()
            .map(|(slot, point)| (point.x - pivots[self.segment[slot]]).abs())
            .collect()
    }
}

struct Occupancy<'a> {
    points: &'a [GridPoint],
    graph: &'a SlotGraph,
    distance: &'a [f32],
    filled: Vec<bool>,
}

impl Occupancy<'_> {
    fn placeable(&self) -> Vec<usize> {
        (0..self.points.len())
            .filter(|&slot| self.is_placeable(slot))
            .collect()
    }

    fn is_placeable(&self, slot: usize) -> bool {
        if self.filled[slot] {
            return false;
        }
        if !self.graph.below[slot].iter().all(|&lower| self.filled[lower]) {
            return false;
        }

        let limit = self.distance[slot] - DISTANCE_EPSILON;
        let segment = &self.graph.segments[self.graph.segment[slot]];
        if segment
            .iter()
            .any(|&other| !self.filled[other] && self.distance[other] < limit)
        {
            return false;
        }

        is_exposed(&self.points[slot], self.occupied_points())
    }

    /// Whether `first` is still removable once `second` joins it.
    fn stays_exposed(&mut self, first: usize, second: usize) -> bool {
        self.filled[second] = true;
        let exposed = is_exposed(&self.points[first], self.occupied_points());
        self.filled[second] = false;
        exposed
    }

    fn occupied_points(&self) -> impl Iterator<Item = &GridPoint> + '_ {
        self.points
            .iter()
            .zip(&self.filled)
            .filter(|(_, filled)| **filled)
            .map(|(point, _)| point)
    }
}

fn find(parent: &mut [usize], slot: usize) -> usize {
    let mut root = slot;
    while parent[root] != root {
        root = parent[root];
    }
    let mut current = slot;
    while parent[current] != root {
        let next = parent[current];
        parent[current] = root;
        current = next;
    }
    root
}

fn union(parent: &mut [usize], a: usize, b: usize) {
    let root_a = find(parent, a);
    let root_b = find(parent, b);
    if root_a != root_b {
        parent[root_b] = root_a;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn row(count: usize) -> Vec<GridPoint> {
        (0..count).map(|x| GridPoint::new(x as f32, 0.0, 0)).collect()
    }

    #[test]
    fn segments_follow_side_adjacency() {
        let mut points = row(3);
        points.push(GridPoint::new(10.0, 0.0, 0));
        points.push(GridPoint::new(1.0, 0.0, 1));
        let graph = SlotGraph::new(&points);

        assert_eq!(graph.segment[0], graph.segment[1]);
        assert_eq!(graph.segment[1], graph.segment[2]);
        assert_ne!(graph.segment[0], graph.segment[3]);
        assert_ne!(graph.segment[1], graph.segment[4]);
        assert_eq!(graph.below[4], vec![1]);
    }

    #[test]
    fn single_row_always_constructs() {
        let points = row(8);
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let order = construct_pairs(&points, &mut rng, |_, _| true);
            assert!(order.is_some(), "seed {seed} stalled");
        }
    }

    #[test]
    fn stacked_column_cannot_be_paired() {
        let points: Vec<GridPoint> = (0..4).map(|z| GridPoint::new(0.0, 0.0, z)).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(construct_pairs(&points, &mut rng, |_, _| true).is_none());
    }

    #[test]
    fn every_slot_is_filled_exactly_once() {
        let points = row(6);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let order = construct_pairs(&points, &mut rng, |_, _| true).expect("row constructs");
        let mut seen: Vec<usize> = order.iter().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn veto_is_respected() {
        let points = row(4);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(construct_pairs(&points, &mut rng, |_, _| false).is_none());
    }
}
