//! Static id tables for the props and monsters layers.

pub mod props;

pub use props::{DOOR_MARKER, MonsterKind, PropKind, SPAWN_MARKER};
