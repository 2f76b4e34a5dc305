//! Tile face pools dealt onto constructed pairs.

use std::collections::BTreeMap;

use mahjong_solitaire_core::{
    bonus_types, standard_types, TileTypeId, COPIES_PER_STANDARD_TYPE, MAX_LAYOUT_POSITIONS,
};

use rand::{seq::SliceRandom, Rng};

/// Two faces that may be removed together.
pub type FacePair = [TileTypeId; 2];

/// Builds the matching face pairs for a board of `positions` tiles, shuffled.
///
/// A full 144-slot board receives the complete deck: every standard type four
/// times and the eight bonus tiles paired within their group. Smaller boards
/// draw standard types only, two pairs per type in random type order, cycling
/// through the types again if a board ever needs more, and finishing with a
/// single pair when the pair count is odd.
pub(crate) fn deal_pairs<R>(positions: usize, rng: &mut R) -> Vec<FacePair>
where
    R: Rng + ?Sized,
{
    let mut pairs = if positions == MAX_LAYOUT_POSITIONS {
        full_deck()
    } else {
        partial_deck(positions / 2, rng)
    };
    pairs.shuffle(rng);
    pairs
}

fn full_deck() -> Vec<FacePair> {
    let mut pairs = Vec::with_capacity(MAX_LAYOUT_POSITIONS / 2);
    for tile in standard_types() {
        for _ in 0..COPIES_PER_STANDARD_TYPE / 2 {
            pairs.push([tile.id, tile.id]);
        }
    }

    let bonus: Vec<TileTypeId> = bonus_types().map(|tile| tile.id).collect();
    for chunk in bonus.chunks_exact(2) {
        pairs.push([chunk[0], chunk[1]]);
    }
    pairs
}

fn partial_deck<R>(pair_count: usize, rng: &mut R) -> Vec<FacePair>
where
    R: Rng + ?Sized,
{
    let mut kinds: Vec<TileTypeId> = standard_types().map(|tile| tile.id).collect();
    kinds.shuffle(rng);

    let mut pairs = Vec::with_capacity(pair_count);
    for kind in kinds.iter().cycle() {
        if pairs.len() >= pair_count {
            break;
        }
        pairs.push([*kind, *kind]);
        if pairs.len() < pair_count {
            pairs.push([*kind, *kind]);
        }
    }
    pairs
}

/// Groups the faces of a board back into matching pairs.
///
/// Standard faces pair with an identical face, bonus faces with any face of
/// the same group. Returns `None` when some face is left without a partner.
#[must_use]
pub fn pair_faces(kinds: &[TileTypeId]) -> Option<Vec<FacePair>> {
    let mut groups: BTreeMap<(u8, u8), Vec<TileTypeId>> = BTreeMap::new();
    for &kind in kinds {
        let key = match kind.resolve().and_then(|tile| tile.match_group) {
            Some(group) => (1, group as u8),
            None => (0, kind.get()),
        };
        groups.entry(key).or_default().push(kind);
    }

    let mut pairs = Vec::with_capacity(kinds.len() / 2);
    for members in groups.values() {
        if members.len() % 2 != 0 {
            return None;
        }
        for chunk in members.chunks_exact(2) {
            pairs.push([chunk[0], chunk[1]]);
        }
    }
    Some(pairs)
}
