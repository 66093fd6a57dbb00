//! Dungeon generation
//!
//! Contains the partition tree, room templates and placement, corridors,
//! tile layers and autotiling.

mod autotile;
mod corridor;
mod generation;
mod partition;
mod placement;
mod raster;
mod rect;
mod room;
mod tilemap;
mod tree;

pub use autotile::{Neighbors, autotile, compute_mask, resolve_cell, wall_variant};
pub use corridor::{Corridor, CorridorDirection, synthesize};
pub use generation::{Dungeon, generate};
pub use partition::build_tree;
pub use placement::{PLACEMENT_ORDER, Quota, fill_by_type, place_rooms};
pub use raster::{carve_corridors, carve_rooms, rasterize};
pub use rect::Rectangle;
pub use room::{Room, RoomTemplate, RoomType, TemplateCatalog};
pub use tilemap::{Layer, Layers, Tilemap};
pub use tree::{Container, ContainerId, Split, TreeNode};
