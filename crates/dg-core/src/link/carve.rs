//! Linking two chunks by carving a walkable path
//!
//! Nothing is written to either chunk unless a path was found.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TILE_SIZE, DEFAULT_WALL_COST, FLOOR, TileId};
use crate::dungeon::{Dungeon, resolve_cell};
use crate::error::LinkFailure;
use crate::params::GenerationParams;

use super::arrival::{Arrival, WorldPos, chunk_offset, detect_arrival};
use super::grid::{ChunkSide, MergedGrid};
use super::search::{GridPos, SearchLimits, ida_star};

/// Knobs of the link pathfinder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkParams {
    /// Tile edge length in world units
    pub tile_size: f32,
    /// How close the player must be to an exit marker's center
    pub snap_tolerance: f32,
    /// Largest path cost searched; defaults to every merged cell at worst cost
    pub max_cost: Option<u32>,
    pub max_expansions: usize,
    /// When set, walls can be dug through at this cost per cell
    pub wall_cost: Option<u32>,
}

impl Default for LinkParams {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            snap_tolerance: 0.1,
            max_cost: None,
            max_expansions: SearchLimits::default().max_expansions,
            wall_cost: None,
        }
    }
}

impl LinkParams {
    /// Settings for linking chunks generated with `params`.
    ///
    /// Generated chunks are walled off from each other by their gutters and
    /// room walls, so digging is on at [`DEFAULT_WALL_COST`].
    pub fn for_params(params: &GenerationParams) -> Self {
        Self {
            tile_size: params.tile_width as f32,
            wall_cost: Some(DEFAULT_WALL_COST),
            ..Self::default()
        }
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_cost: self.max_cost,
            max_expansions: self.max_expansions,
        }
    }
}

/// One cell rewritten by a link, for renderers to retire and rebuild geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePatch {
    pub chunk: ChunkSide,
    /// Cell in that chunk's own coordinates
    pub x: i32,
    pub y: i32,
    pub previous: TileId,
    pub tile: TileId,
}

/// A successful link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkLink {
    /// Position of the next chunk relative to the current one, in tiles
    pub offset: (i32, i32),
    /// Path cells in the current chunk's coordinates, start and door included
    pub path: Vec<(i32, i32)>,
    pub cost: u32,
    /// Door cell reached, in the next chunk's coordinates
    pub door: (i32, i32),
    pub patches: Vec<TilePatch>,
}

/// Connect `start` (a cell of `current`) to the nearest door of `next`.
///
/// `next` is placed at `offset` tiles from `current`. The path is carved as
/// floor into every chunk covering it, then the walls and holes around it are
/// re-autotiled.
pub fn link_chunks(
    current: &mut Dungeon,
    next: &mut Dungeon,
    start: (i32, i32),
    offset: (i32, i32),
    params: &LinkParams,
) -> Result<ChunkLink, LinkFailure> {
    let mut grid = MergedGrid::new(current, next, offset).with_wall_cost(params.wall_cost);

    let start_pos = grid.to_grid(ChunkSide::Current, start);
    if !grid.is_walkable(start_pos) {
        return Err(LinkFailure::StartBlocked {
            x: start.0,
            y: start.1,
        });
    }

    let goal = nearest_door(&grid.doors(next), start_pos).ok_or(LinkFailure::NoDoor)?;
    let result = ida_star(&grid, start_pos, goal, params.limits())?;

    let mut patches = Vec::new();
    for &pos in &result.path {
        grid.set_floor(pos);
        for side in [ChunkSide::Current, ChunkSide::Next] {
            let Some(cell) = grid.to_chunk(side, pos) else {
                continue;
            };
            let chunk = match side {
                ChunkSide::Current => &mut *current,
                ChunkSide::Next => &mut *next,
            };
            if let Some(previous) = chunk.layers.tiles.set(cell.0, cell.1, FLOOR)
                && previous != FLOOR
            {
                patches.push(TilePatch {
                    chunk: side,
                    x: cell.0,
                    y: cell.1,
                    previous,
                    tile: FLOOR,
                });
            }
        }
    }

    let carved: Vec<TilePatch> = patches.clone();
    for patch in &carved {
        let chunk = match patch.chunk {
            ChunkSide::Current => &mut *current,
            ChunkSide::Next => &mut *next,
        };
        retile_around(chunk, patch.chunk, (patch.x, patch.y), &mut patches);
    }

    let bounds = grid.bounds();
    let door = grid.to_chunk(ChunkSide::Next, goal).unwrap_or_default();
    log::info!(
        "linked chunks at offset {:?}: {} cells, cost {}, {} patches",
        offset,
        result.path.len(),
        result.cost,
        patches.len()
    );

    Ok(ChunkLink {
        offset,
        path: result
            .path
            .iter()
            .map(|&(gx, gy)| (gx + bounds.x, gy + bounds.y))
            .collect(),
        cost: result.cost,
        door,
        patches,
    })
}

/// Detect the exit under `player` and link `next` beyond it.
pub fn link_on_arrival(
    current: &mut Dungeon,
    next: &mut Dungeon,
    origin: WorldPos,
    player: WorldPos,
    params: &LinkParams,
) -> Result<(Arrival, ChunkLink), LinkFailure> {
    let arrival = detect_arrival(current, origin, player, params.tile_size, params.snap_tolerance)
        .ok_or(LinkFailure::NoExitMarker)?;
    let offset = chunk_offset(current, arrival.direction);
    let link = link_chunks(current, next, (arrival.x, arrival.y), offset, params)?;
    Ok((arrival, link))
}

/// Closest door by straight-line distance; ties keep the earlier one.
fn nearest_door(doors: &[GridPos], from: GridPos) -> Option<GridPos> {
    doors.iter().copied().min_by_key(|&(x, y)| {
        let (dx, dy) = (i64::from(x - from.0), i64::from(y - from.1));
        dx * dx + dy * dy
    })
}

/// Re-resolve the walls and holes around a carved cell.
fn retile_around(chunk: &mut Dungeon, side: ChunkSide, (x, y): (i32, i32), patches: &mut Vec<TilePatch>) {
    for ny in y - 1..=y + 1 {
        for nx in x - 1..=x + 1 {
            let Some(previous) = chunk.layers.tiles.get(nx, ny) else {
                continue;
            };
            if previous == FLOOR {
                continue;
            }
            let Some(tile) = resolve_cell(&chunk.layers.tiles, nx, ny) else {
                continue;
            };
            if tile != previous {
                chunk.layers.tiles.set(nx, ny, tile);
                patches.push(TilePatch {
                    chunk: side,
                    x: nx,
                    y: ny,
                    previous,
                    tile,
                });
            }
        }
    }
}
