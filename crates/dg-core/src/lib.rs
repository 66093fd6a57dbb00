//! dg-core: seeded dungeon generation and chunk linking
//!
//! This crate contains the generator (space partitioning, room placement,
//! corridors, rasterization and autotiling) and the pathfinder that stitches
//! consecutive chunks together. It does no rendering and emits integer tile
//! ids only.
//!
//! ```no_run
//! use dg_core::{GenerationParams, TemplateCatalog, generate};
//!
//! let catalog: TemplateCatalog = serde_json::from_str("[]").unwrap();
//! let dungeon = generate(&GenerationParams::default(), &catalog);
//! assert!(dungeon.is_err());
//! ```

pub mod consts;
pub mod data;
pub mod dungeon;
pub mod error;
pub mod link;
pub mod params;
pub mod rng;
pub mod save;

pub use consts::*;
pub use data::{DOOR_MARKER, SPAWN_MARKER};
pub use dungeon::{Dungeon, Layer, Layers, RoomTemplate, RoomType, TemplateCatalog, Tilemap, generate};
pub use error::{
    ConfigurationError, DungeonShapeError, LinkFailure, PlacementWarning, SaveError, TilemapError,
};
pub use link::{ChunkChain, ChunkLink, Direction, LinkParams, TilePatch, WorldPos};
pub use params::GenerationParams;
pub use rng::{DungeonRng, Seed};
