//! Tile grids and the three dungeon layers.

use core::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{EMPTY, TileId};
use crate::error::TilemapError;

/// A rectangular grid of tile ids, stored row-major.
///
/// Serialized as an array of rows (`int[][]`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<TileId>>", into = "Vec<Vec<TileId>>")]
pub struct Tilemap {
    width: usize,
    height: usize,
    cells: Vec<TileId>,
}

impl Tilemap {
    /// A `width × height` grid filled with `fill`. Negative sizes give an empty grid.
    pub fn new(width: i32, height: i32, fill: TileId) -> Self {
        let width = usize::try_from(width).unwrap_or(0);
        let height = usize::try_from(height).unwrap_or(0);
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Build a grid from rows, rejecting ragged input
    pub fn from_rows(rows: Vec<Vec<TileId>>) -> Result<Self, TilemapError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * height);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != width {
                return Err(TilemapError {
                    row,
                    expected: width,
                    found: cols.len(),
                });
            }
            cells.extend(cols);
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> i32 {
        self.width as i32
    }

    pub fn height(&self) -> i32 {
        self.height as i32
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    /// Tile at `(x, y)`, `None` off-grid
    pub fn get(&self, x: i32, y: i32) -> Option<TileId> {
        self.offset(x, y).map(|i| self.cells[i])
    }

    /// Overwrite `(x, y)` and return the previous id; `None` (no-op) off-grid
    pub fn set(&mut self, x: i32, y: i32, id: TileId) -> Option<TileId> {
        let i = self.offset(x, y)?;
        Some(core::mem::replace(&mut self.cells[i], id))
    }

    /// Copy `source` verbatim with its top-left at `(x, y)`; off-grid cells are dropped
    pub fn stamp(&mut self, x: i32, y: i32, source: &Tilemap) {
        for (sx, sy, id) in source.iter() {
            self.set(x + sx, y + sy, id);
        }
    }

    /// Every cell as `(x, y, id)`, row by row
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, TileId)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &id)| ((i % width) as i32, (i / width) as i32, id))
    }

    /// Rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[TileId]> + '_ {
        (0..self.height).map(move |y| &self.cells[y * self.width..(y + 1) * self.width])
    }

    pub fn to_rows(&self) -> Vec<Vec<TileId>> {
        self.rows().map(<[TileId]>::to_vec).collect()
    }

    /// Number of cells matching `pred`
    pub fn count(&self, pred: impl Fn(TileId) -> bool) -> usize {
        self.cells.iter().filter(|&&id| pred(id)).count()
    }

    /// Whether every cell matches `pred`
    pub fn all(&self, pred: impl Fn(TileId) -> bool) -> bool {
        self.cells.iter().all(|&id| pred(id))
    }
}

impl TryFrom<Vec<Vec<TileId>>> for Tilemap {
    type Error = TilemapError;

    fn try_from(rows: Vec<Vec<TileId>>) -> Result<Self, Self::Error> {
        Tilemap::from_rows(rows)
    }
}

impl From<Tilemap> for Vec<Vec<TileId>> {
    fn from(map: Tilemap) -> Self {
        map.to_rows()
    }
}

/// The three layers a dungeon or a room template is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Layer {
    Tiles,
    Props,
    Monsters,
}

/// One tilemap per [`Layer`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Layers {
    pub tiles: Tilemap,
    pub props: Tilemap,
    pub monsters: Tilemap,
}

impl Layers {
    /// `tiles` filled with `fill`, `props` and `monsters` empty
    pub fn new(width: i32, height: i32, fill: TileId) -> Self {
        Self {
            tiles: Tilemap::new(width, height, fill),
            props: Tilemap::new(width, height, EMPTY),
            monsters: Tilemap::new(width, height, EMPTY),
        }
    }

    /// Whether all three layers are `width × height`
    pub fn has_size(&self, width: i32, height: i32) -> bool {
        [&self.tiles, &self.props, &self.monsters]
            .iter()
            .all(|map| map.width() == width && map.height() == height)
    }
}

impl Index<Layer> for Layers {
    type Output = Tilemap;

    fn index(&self, layer: Layer) -> &Tilemap {
        match layer {
            Layer::Tiles => &self.tiles,
            Layer::Props => &self.props,
            Layer::Monsters => &self.monsters,
        }
    }
}

impl IndexMut<Layer> for Layers {
    fn index_mut(&mut self, layer: Layer) -> &mut Tilemap {
        match layer {
            Layer::Tiles => &mut self.tiles,
            Layer::Props => &mut self.props,
            Layer::Monsters => &mut self.monsters,
        }
    }
}
