//! Prop and monster ids painted into room templates.
//!
//! The generator never interprets these beyond two markers: [`DOOR_MARKER`]
//! (chunk exits and link targets) and [`SPAWN_MARKER`] (player start).

use strum::{Display, EnumIter, IntoEnumIterator};

use crate::consts::TileId;

/// Prop kinds that may appear in the `props` layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[repr(i32)]
pub enum PropKind {
    // Traps
    Peak = 1,
    // Decor
    Bone = 2,
    Flag = 3,
    CrateSilver = 4,
    CrateWood = 5,
    Handcuff1 = 6,
    Handcuff2 = 7,
    Lamp = 8,
    Skull = 9,
    StonesLarge = 10,
    StonesSmall = 11,
    Torch = 12,
    WebLeft = 13,
    WebRight = 14,
    // Items
    HealthLarge = 15,
    HealthSmall = 16,
    KeyGold = 17,
    KeySilver = 18,
    ManaLarge = 19,
    ManaSmall = 20,
    // Spawns
    Ladder = 21,
    Arrow = 22,
}

/// Prop id marking a chunk exit / door cell
pub const DOOR_MARKER: TileId = PropKind::Arrow as TileId;

/// Prop id marking the player's spawn cell
pub const SPAWN_MARKER: TileId = PropKind::Ladder as TileId;

impl PropKind {
    /// Look up a prop by its layer id
    pub fn from_id(id: TileId) -> Option<Self> {
        Self::iter().find(|kind| kind.id() == id)
    }

    /// The id stored in the `props` layer
    pub const fn id(self) -> TileId {
        self as TileId
    }

    /// ASCII glyph used by text previews
    pub const fn glyph(self) -> char {
        match self {
            PropKind::Peak => '^',
            PropKind::Bone | PropKind::Skull => '%',
            PropKind::Flag => 'F',
            PropKind::CrateSilver | PropKind::CrateWood => '=',
            PropKind::Handcuff1 | PropKind::Handcuff2 => '&',
            PropKind::Lamp | PropKind::Torch => '*',
            PropKind::StonesLarge | PropKind::StonesSmall => ',',
            PropKind::WebLeft | PropKind::WebRight => '"',
            PropKind::HealthLarge | PropKind::HealthSmall => '!',
            PropKind::KeyGold | PropKind::KeySilver => '?',
            PropKind::ManaLarge | PropKind::ManaSmall => '!',
            PropKind::Ladder => '<',
            PropKind::Arrow => '>',
        }
    }
}

/// Monster kinds that may appear in the `monsters` layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[repr(i32)]
pub enum MonsterKind {
    Bandit = 1,
    CentaurFemale = 2,
    CentaurMale = 3,
    MushroomLarge = 4,
    MushroomSmall = 5,
    Skeleton = 6,
    Troll = 7,
    Wolf = 8,
}

impl MonsterKind {
    /// Look up a monster by its layer id
    pub fn from_id(id: TileId) -> Option<Self> {
        Self::iter().find(|kind| kind.id() == id)
    }

    /// The id stored in the `monsters` layer
    pub const fn id(self) -> TileId {
        self as TileId
    }

    /// ASCII glyph used by text previews
    pub const fn glyph(self) -> char {
        match self {
            MonsterKind::Bandit => 'b',
            MonsterKind::CentaurFemale | MonsterKind::CentaurMale => 'C',
            MonsterKind::MushroomLarge | MonsterKind::MushroomSmall => 'm',
            MonsterKind::Skeleton => 'Z',
            MonsterKind::Troll => 'T',
            MonsterKind::Wolf => 'd',
        }
    }
}
