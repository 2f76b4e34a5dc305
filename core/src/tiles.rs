//! Static tile catalog and the pair-matching predicate.

use serde::{Deserialize, Serialize};

/// Number of distinct tile types in the standard deck.
pub const TILE_TYPE_COUNT: usize = 42;

/// Number of non-bonus tile types; each appears four times in a full deck.
pub const STANDARD_TYPE_COUNT: usize = 34;

/// Copies of every standard tile type contained in a full deck.
pub const COPIES_PER_STANDARD_TYPE: usize = 4;

/// Families of tiles found in the standard deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileCategory {
    /// Dots suit, numbered one through nine.
    Circles,
    /// Bamboo suit, numbered one through nine.
    Bamboo,
    /// Characters suit, numbered one through nine.
    Characters,
    /// The four wind honors.
    Winds,
    /// The three dragon honors.
    Dragons,
    /// Bonus season tiles.
    Seasons,
    /// Bonus flower tiles.
    Flowers,
}

impl TileCategory {
    /// Every category in catalog order.
    pub const ALL: [TileCategory; 7] = [
        TileCategory::Circles,
        TileCategory::Bamboo,
        TileCategory::Characters,
        TileCategory::Winds,
        TileCategory::Dragons,
        TileCategory::Seasons,
        TileCategory::Flowers,
    ];

    /// Color presentation layers use when drawing tiles of this category.
    #[must_use]
    pub const fn display_color(self) -> TileColor {
        match self {
            Self::Circles => TileColor::from_rgb(0x1f, 0x6f, 0xb2),
            Self::Bamboo => TileColor::from_rgb(0x2f, 0x95, 0x32),
            Self::Characters => TileColor::from_rgb(0xc8, 0x2a, 0x36),
            Self::Winds => TileColor::from_rgb(0x37, 0x3d, 0x47),
            Self::Dragons => TileColor::from_rgb(0x8e, 0x24, 0xaa),
            Self::Seasons => TileColor::from_rgb(0xff, 0xc1, 0x07),
            Self::Flowers => TileColor::from_rgb(0xe9, 0x1e, 0x63),
        }
    }

    /// Whether tiles of this category belong to a bonus match group.
    #[must_use]
    pub const fn is_bonus(self) -> bool {
        matches!(self, Self::Seasons | Self::Flowers)
    }
}

/// RGB color associated with a tile category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl TileColor {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Bonus groups whose members are interchangeable when matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchGroup {
    /// Spring, summer, autumn and winter.
    Seasons,
    /// Plum, orchid, chrysanthemum and bamboo flowers.
    Flowers,
}

/// Index of a tile type inside [`TILE_TYPES`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileTypeId(u8);

impl TileTypeId {
    /// Creates an identifier from its catalog index.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the catalog index.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Resolves the identifier against the static catalog.
    #[must_use]
    pub fn resolve(self) -> Option<&'static TileType> {
        tile_type(self)
    }
}

/// Immutable description of one tile face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileType {
    /// Catalog identifier.
    pub id: TileTypeId,
    /// Stable textual key such as `circle-1` or `season-spring`.
    pub key: &'static str,
    /// Family the tile belongs to.
    pub category: TileCategory,
    /// Short value printed on the face.
    pub value: &'static str,
    /// Unicode Mahjong glyph for the face.
    pub symbol: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Bonus group, present only for seasons and flowers.
    pub match_group: Option<MatchGroup>,
}

impl TileType {
    /// Whether the type belongs to the standard (non-bonus) part of the deck.
    #[must_use]
    pub const fn is_standard(&self) -> bool {
        self.match_group.is_none()
    }
}

const fn face(
    index: u8,
    key: &'static str,
    category: TileCategory,
    value: &'static str,
    symbol: &'static str,
    name: &'static str,
) -> TileType {
    let match_group = match category {
        TileCategory::Seasons => Some(MatchGroup::Seasons),
        TileCategory::Flowers => Some(MatchGroup::Flowers),
        _ => None,
    };
    TileType {
        id: TileTypeId::new(index),
        key,
        category,
        value,
        symbol,
        name,
        match_group,
    }
}

use TileCategory::{Bamboo, Characters, Circles, Dragons, Flowers, Seasons, Winds};

/// The 42 tile types of the standard deck; standard types come first.
pub const TILE_TYPES: [TileType; TILE_TYPE_COUNT] = [
    face(0, "circle-1", Circles, "1", "\u{1F019}", "One of Circles"),
    face(1, "circle-2", Circles, "2", "\u{1F01A}", "Two of Circles"),
    face(2, "circle-3", Circles, "3", "\u{1F01B}", "Three of Circles"),
    face(3, "circle-4", Circles, "4", "\u{1F01C}", "Four of Circles"),
    face(4, "circle-5", Circles, "5", "\u{1F01D}", "Five of Circles"),
    face(5, "circle-6", Circles, "6", "\u{1F01E}", "Six of Circles"),
    face(6, "circle-7", Circles, "7", "\u{1F01F}", "Seven of Circles"),
    face(7, "circle-8", Circles, "8", "\u{1F020}", "Eight of Circles"),
    face(8, "circle-9", Circles, "9", "\u{1F021}", "Nine of Circles"),
    face(9, "bamboo-1", Bamboo, "1", "\u{1F010}", "One of Bamboo"),
    face(10, "bamboo-2", Bamboo, "2", "\u{1F011}", "Two of Bamboo"),
    face(11, "bamboo-3", Bamboo, "3", "\u{1F012}", "Three of Bamboo"),
    face(12, "bamboo-4", Bamboo, "4", "\u{1F013}", "Four of Bamboo"),
    face(13, "bamboo-5", Bamboo, "5", "\u{1F014}", "Five of Bamboo"),
    face(14, "bamboo-6", Bamboo, "6", "\u{1F015}", "Six of Bamboo"),
    face(15, "bamboo-7", Bamboo, "7", "\u{1F016}", "Seven of Bamboo"),
    face(16, "bamboo-8", Bamboo, "8", "\u{1F017}", "Eight of Bamboo"),
    face(17, "bamboo-9", Bamboo, "9", "\u{1F018}", "Nine of Bamboo"),
    face(18, "character-1", Characters, "1", "\u{1F007}", "One of Characters"),
    face(19, "character-2", Characters, "2", "\u{1F008}", "Two of Characters"),
    face(20, "character-3", Characters, "3", "\u{1F009}", "Three of Characters"),
    face(21, "character-4", Characters, "4", "\u{1F00A}", "Four of Characters"),
    face(22, "character-5", Characters, "5", "\u{1F00B}", "Five of Characters"),
    face(23, "character-6", Characters, "6", "\u{1F00C}", "Six of Characters"),
    face(24, "character-7", Characters, "7", "\u{1F00D}", "Seven of Characters"),
    face(25, "character-8", Characters, "8", "\u{1F00E}", "Eight of Characters"),
    face(26, "character-9", Characters, "9", "\u{1F00F}", "Nine of Characters"),
    face(27, "wind-east", Winds, "E", "\u{1F000}", "East Wind"),
    face(28, "wind-south", Winds, "S", "\u{1F001}", "South Wind"),
    face(29, "wind-west", Winds, "W", "\u{1F002}", "West Wind"),
    face(30, "wind-north", Winds, "N", "\u{1F003}", "North Wind"),
    face(31, "dragon-red", Dragons, "R", "\u{1F004}", "Red Dragon"),
    face(32, "dragon-green", Dragons, "G", "\u{1F005}", "Green Dragon"),
    face(33, "dragon-white", Dragons, "W", "\u{1F006}", "White Dragon"),
    face(34, "season-spring", Seasons, "1", "\u{1F026}", "Spring"),
    face(35, "season-summer", Seasons, "2", "\u{1F027}", "Summer"),
    face(36, "season-autumn", Seasons, "3", "\u{1F028}", "Autumn"),
    face(37, "season-winter", Seasons, "4", "\u{1F029}", "Winter"),
    face(38, "flower-plum", Flowers, "1", "\u{1F022}", "Plum"),
    face(39, "flower-orchid", Flowers, "2", "\u{1F023}", "Orchid"),
    face(40, "flower-chrysanthemum", Flowers, "3", "\u{1F025}", "Chrysanthemum"),
    face(41, "flower-bamboo", Flowers, "4", "\u{1F024}", "Bamboo"),
];

/// Looks up a tile type by identifier.
#[must_use]
pub fn tile_type(id: TileTypeId) -> Option<&'static TileType> {
    TILE_TYPES.get(usize::from(id.get()))
}

/// Looks up a tile type by its textual key.
#[must_use]
pub fn tile_type_by_key(key: &str) -> Option<&'static TileType> {
    TILE_TYPES.iter().find(|tile| tile.key == key)
}

/// Iterator over the 34 standard (non-bonus) tile types.
pub fn standard_types() -> impl Iterator<Item = &'static TileType> {
    TILE_TYPES.iter().filter(|tile| tile.is_standard())
}

/// Iterator over the eight bonus tile types.
pub fn bonus_types() -> impl Iterator<Item = &'static TileType> {
    TILE_TYPES.iter().filter(|tile| !tile.is_standard())
}

/// Reports whether two tile types may be removed together.
///
/// Standard tiles match only an identical type. Bonus tiles match any other
/// tile from the same [`MatchGroup`]. Unknown identifiers never match.
#[must_use]
pub fn tiles_match(first: TileTypeId, second: TileTypeId) -> bool {
    if first == second {
        return tile_type(first).is_some();
    }

    match (tile_type(first), tile_type(second)) {
        (Some(a), Some(b)) => match (a.match_group, b.match_group) {
            (Some(group_a), Some(group_b)) => group_a == group_b,
            _ => false,
        },
        _ => false,
    }
}
