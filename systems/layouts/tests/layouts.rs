use std::collections::HashSet;

use mahjong_solitaire_core::{validate_positions, LayoutId, MAX_LAYOUT_POSITIONS};
use mahjong_solitaire_layouts::{catalog, layout, layout_by_name};

#[test]
fn catalog_lists_every_layout_in_menu_order() {
    let ids: Vec<LayoutId> = catalog().iter().map(|entry| entry.id()).collect();
    assert_eq!(ids, LayoutId::ALL.to_vec());
}

#[test]
fn turtle_holds_a_full_deck() {
    assert_eq!(layout(LayoutId::Turtle).tile_count(), MAX_LAYOUT_POSITIONS);
}

#[test]
fn layout_sizes_match_their_shapes() {
    let sizes: Vec<(LayoutId, usize)> = catalog()
        .iter()
        .map(|entry| (entry.id(), entry.tile_count()))
        .collect();
    assert_eq!(
        sizes,
        vec![
            (LayoutId::Turtle, 144),
            (LayoutId::Pyramid, 120),
            (LayoutId::Dragon, 142),
            (LayoutId::Fortress, 104),
            (LayoutId::Bridge, 130),
        ]
    );
}

#[test]
fn every_layout_is_valid_and_named() {
    let mut names = HashSet::new();
    for entry in catalog() {
        assert!(validate_positions(entry.positions()).is_ok(), "{}", entry.id());
        assert!(!entry.description().is_empty());
        assert!(names.insert(entry.name()), "duplicate name {}", entry.name());
    }
}

#[test]
fn turtle_capstone_sits_between_four_tiles() {
    let turtle = layout(LayoutId::Turtle);
    let top = turtle
        .positions()
        .iter()
        .max_by_key(|point| point.z)
        .expect("turtle has positions");
    assert_eq!((top.x, top.y, top.z), (6.5, 3.5, 4));
    let supports = turtle
        .positions()
        .iter()
        .filter(|point| point.z == 3)
        .count();
    assert_eq!(supports, 4);
}

#[test]
fn lookup_by_name_uses_sentinel_for_unknown_ids() {
    assert_eq!(
        layout_by_name("fortress").map(|entry| entry.id()),
        Some(LayoutId::Fortress)
    );
    assert!(layout_by_name("spiral").is_none());
}

#[test]
fn lookup_by_id_returns_matching_layout() {
    for id in LayoutId::ALL {
        assert_eq!(layout(id).id(), id);
    }
}
