//! Arrival detection and chunk placement
//!
//! World positions are continuous. Tiles are drawn centered on their anchor,
//! so a chunk's cell `(x, y)` is centered at `origin + cell * tile_size`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::data::DOOR_MARKER;
use crate::dungeon::Dungeon;

/// A continuous position in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Center of cell `(x, y)` of a chunk anchored at `self`
    pub fn cell_center(self, x: i32, y: i32, tile_size: f32) -> WorldPos {
        WorldPos::new(self.x + x as f32 * tile_size, self.y + y as f32 * tile_size)
    }

    pub fn offset(self, dx: f32, dy: f32) -> WorldPos {
        WorldPos::new(self.x + dx, self.y + dy)
    }
}

/// The chunk edge a player is travelling through.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// Edge of a `width × height` chunk closest to cell `(x, y)`.
    ///
    /// Distances are `top = y`, `right = |x - width|`, `bottom = |y - height|`,
    /// `left = x`; ties go to the first in that order.
    pub fn nearest_edge(x: i32, y: i32, width: i32, height: i32) -> Direction {
        let candidates = [
            (y.abs(), Direction::Top),
            ((x - width).abs(), Direction::Right),
            ((y - height).abs(), Direction::Bottom),
            (x.abs(), Direction::Left),
        ];
        candidates
            .into_iter()
            .min_by_key(|&(distance, _)| distance)
            .map_or(Direction::Top, |(_, direction)| direction)
    }
}

/// An exit marker the player is standing on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrival {
    /// Marker cell in chunk coordinates
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

/// Find the exit marker under `player`.
///
/// Markers are scanned row by row; the first one whose center is closer than
/// `snap_tolerance` on both axes wins.
pub fn detect_arrival(
    chunk: &Dungeon,
    origin: WorldPos,
    player: WorldPos,
    tile_size: f32,
    snap_tolerance: f32,
) -> Option<Arrival> {
    let (x, y) = chunk
        .layers
        .props
        .iter()
        .filter(|&(_, _, id)| id == DOOR_MARKER)
        .map(|(x, y, _)| (x, y))
        .find(|&(x, y)| {
            let center = origin.cell_center(x, y, tile_size);
            (player.x - center.x).abs() < snap_tolerance
                && (player.y - center.y).abs() < snap_tolerance
        })?;

    let direction = Direction::nearest_edge(x, y, chunk.width, chunk.height);
    log::debug!("arrived at exit ({x}, {y}) heading {direction}");
    Some(Arrival { x, y, direction })
}

/// Tile offset of the chunk following `previous` in `direction`.
pub fn chunk_offset(previous: &Dungeon, direction: Direction) -> (i32, i32) {
    match direction {
        Direction::Top => (0, -previous.height),
        Direction::Right => (previous.width, 0),
        Direction::Bottom => (0, previous.height),
        Direction::Left => (-previous.width, 0),
    }
}

/// [`chunk_offset`] in world units
pub fn world_offset(previous: &Dungeon, direction: Direction, tile_size: f32) -> (f32, f32) {
    let (dx, dy) = chunk_offset(previous, direction);
    (dx as f32 * tile_size, dy as f32 * tile_size)
}
