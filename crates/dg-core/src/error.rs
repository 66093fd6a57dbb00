//! Error and diagnostic types.

use core::fmt;

use thiserror::Error;

use crate::dungeon::{ContainerId, Layer, RoomType};

/// Errors that abort a generation call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("couldn't find templates of type \"{room_type}\"")]
    MissingTemplates { room_type: RoomType },

    #[error("couldn't find containers to fit {count} templates of type \"{room_type}\"")]
    NoEmptyContainers { room_type: RoomType, count: usize },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("malformed template \"{id}\": {reason}")]
    MalformedTemplate { id: String, reason: String },
}

/// A leaf that no template of the requested type could fit.
///
/// Generation continues; the leaf is left without a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementWarning {
    pub container: ContainerId,
    pub width: i32,
    pub height: i32,
    pub room_type: RoomType,
}

impl fmt::Display for PlacementWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "couldn't find a template fitting width={} height={} for type={} (container {})",
            self.width, self.height, self.room_type, self.container
        )
    }
}

/// Reasons a chunk link was not made. None of these are fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkFailure {
    #[error("player is not standing on an exit marker")]
    NoExitMarker,

    #[error("the new chunk has no door cell")]
    NoDoor,

    #[error("arrival cell ({x}, {y}) is not walkable")]
    StartBlocked { x: i32, y: i32 },

    #[error("no path within cost bound {bound} after {expansions} expansions")]
    SearchExhausted { bound: u32, expansions: usize },
}

/// A tilemap whose rows are not all the same length.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("row {row} has {found} cells, expected {expected}")]
pub struct TilemapError {
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

/// A decoded dungeon whose size and layers disagree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DungeonShapeError {
    #[error("negative dungeon size {width}x{height}")]
    NegativeSize { width: i32, height: i32 },

    #[error("{layer} layer is {found_width}x{found_height}, expected {width}x{height}")]
    LayerSize {
        layer: Layer,
        width: i32,
        height: i32,
        found_width: i32,
        found_height: i32,
    },
}

/// Import/export errors
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
