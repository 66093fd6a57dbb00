//! Walkability grid spanning two adjacent chunks

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::consts::{FLOOR, TileId};
use crate::data::DOOR_MARKER;
use crate::dungeon::{Dungeon, Rectangle};

use super::search::{CostGrid, GridPos};

/// Which of the two linked chunks a cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChunkSide {
    /// The chunk the player is leaving
    Current,
    /// The chunk being attached
    Next,
}

/// One cell of the merged grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergedCell {
    /// Covered by neither chunk
    Void,
    Tile { side: ChunkSide, tile: TileId, prop: TileId },
}

impl MergedCell {
    /// Open floor or a door marker
    pub fn is_walkable(self) -> bool {
        matches!(self, MergedCell::Tile { tile, prop, .. } if tile == FLOOR || prop == DOOR_MARKER)
    }

    pub fn is_wall(self) -> bool {
        matches!(self, MergedCell::Tile { tile, .. } if tile > 0)
    }
}

/// The bounding rectangle of two chunks as one grid.
///
/// Coordinates handed to and returned from the grid are relative to its
/// top-left corner. The current chunk sits at `(0, 0)` in chunk space and the
/// next one at `offset`; where they overlap the next chunk wins.
#[derive(Debug, Clone)]
pub struct MergedGrid {
    /// Bounds in the current chunk's coordinates
    bounds: Rectangle,
    current: Rectangle,
    next: Rectangle,
    cells: Vec<MergedCell>,
    wall_cost: Option<u32>,
}

impl MergedGrid {
    pub fn new(current: &Dungeon, next: &Dungeon, offset: (i32, i32)) -> Self {
        let current_rect = Rectangle::new(0, 0, current.width, current.height);
        let next_rect = Rectangle::new(offset.0, offset.1, next.width, next.height);

        let x = current_rect.x.min(next_rect.x);
        let y = current_rect.y.min(next_rect.y);
        let bounds = Rectangle::new(
            x,
            y,
            current_rect.right().max(next_rect.right()) - x,
            current_rect.bottom().max(next_rect.bottom()) - y,
        );

        let cells = bounds
            .cells()
            .map(|(cx, cy)| {
                if next_rect.contains_point(cx, cy) {
                    sample(next, ChunkSide::Next, cx - offset.0, cy - offset.1)
                } else if current_rect.contains_point(cx, cy) {
                    sample(current, ChunkSide::Current, cx, cy)
                } else {
                    MergedCell::Void
                }
            })
            .collect();

        Self {
            bounds,
            current: current_rect,
            next: next_rect,
            cells,
            wall_cost: None,
        }
    }

    /// Let the search enter wall cells at `cost` per step
    pub fn with_wall_cost(mut self, cost: Option<u32>) -> Self {
        self.wall_cost = cost.map(|c| c.max(1));
        self
    }

    pub fn width(&self) -> i32 {
        self.bounds.width
    }

    pub fn height(&self) -> i32 {
        self.bounds.height
    }

    /// Bounds in the current chunk's coordinates
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn offset_of(&self, (x, y): GridPos) -> Option<usize> {
        (x >= 0 && y >= 0 && x < self.bounds.width && y < self.bounds.height)
            .then(|| (y * self.bounds.width + x) as usize)
    }

    pub fn cell(&self, pos: GridPos) -> Option<MergedCell> {
        self.offset_of(pos).map(|i| self.cells[i])
    }

    pub fn is_walkable(&self, pos: GridPos) -> bool {
        self.cell(pos).is_some_and(MergedCell::is_walkable)
    }

    /// Grid position of a cell given in `side`'s own coordinates
    pub fn to_grid(&self, side: ChunkSide, (x, y): (i32, i32)) -> GridPos {
        let rect = self.rect_of(side);
        (x + rect.x - self.bounds.x, y + rect.y - self.bounds.y)
    }

    /// `side`'s own coordinates of a grid cell, if that chunk covers it
    pub fn to_chunk(&self, side: ChunkSide, (gx, gy): GridPos) -> Option<(i32, i32)> {
        let rect = self.rect_of(side);
        let (cx, cy) = (gx + self.bounds.x, gy + self.bounds.y);
        rect.contains_point(cx, cy)
            .then(|| (cx - rect.x, cy - rect.y))
    }

    fn rect_of(&self, side: ChunkSide) -> Rectangle {
        match side {
            ChunkSide::Current => self.current,
            ChunkSide::Next => self.next,
        }
    }

    /// Door cells of the next chunk, in its row-major order
    pub fn doors(&self, next: &Dungeon) -> Vec<GridPos> {
        next.find_props(DOOR_MARKER)
            .into_iter()
            .map(|cell| self.to_grid(ChunkSide::Next, cell))
            .collect()
    }

    /// Mark a grid cell as floor
    pub fn set_floor(&mut self, pos: GridPos) {
        if let Some(i) = self.offset_of(pos)
            && let MergedCell::Tile { tile, .. } = &mut self.cells[i]
        {
            *tile = FLOOR;
        }
    }
}

fn sample(chunk: &Dungeon, side: ChunkSide, x: i32, y: i32) -> MergedCell {
    match (chunk.layers.tiles.get(x, y), chunk.layers.props.get(x, y)) {
        (Some(tile), prop) => MergedCell::Tile {
            side,
            tile,
            prop: prop.unwrap_or_default(),
        },
        (None, _) => MergedCell::Void,
    }
}

impl CostGrid for MergedGrid {
    fn step_cost(&self, pos: GridPos) -> Option<u32> {
        let cell = self.cell(pos)?;
        if cell.is_walkable() {
            Some(1)
        } else if cell.is_wall() {
            self.wall_cost
        } else {
            None
        }
    }

    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn max_step_cost(&self) -> u32 {
        self.wall_cost.unwrap_or(1)
    }
}
