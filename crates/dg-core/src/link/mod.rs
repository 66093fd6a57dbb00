//! Chunk linking
//!
//! Detects when the player reaches an exit, places the next chunk beside the
//! current one and carves a path between them.

mod arrival;
mod carve;
mod chain;
mod grid;
mod search;

pub use arrival::{Arrival, Direction, WorldPos, chunk_offset, detect_arrival, world_offset};
pub use carve::{ChunkLink, LinkParams, TilePatch, link_chunks, link_on_arrival};
pub use chain::{ChunkChain, PlacedChunk, Transition, chunk_seed};
pub use grid::{ChunkSide, MergedCell, MergedGrid};
pub use search::{CostGrid, GridPos, SearchLimits, SearchResult, ida_star, manhattan};
