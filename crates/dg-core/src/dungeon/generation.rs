//! Dungeon generation entry point
//!
//! Generates one dungeon chunk: partition, rooms, corridors, tiles.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::consts::{FLOOR, TileId};
use crate::error::{ConfigurationError, DungeonShapeError, PlacementWarning};
use crate::params::GenerationParams;
use crate::rng::DungeonRng;

use super::partition::build_tree;
use super::placement::place_rooms;
use super::raster::rasterize;
use super::room::TemplateCatalog;
use super::tilemap::{Layer, Layers};
use super::tree::TreeNode;

/// A generated dungeon chunk.
///
/// Only the size and the layers are serialized; the partition tree and the
/// placement warnings exist only on freshly generated values. Decoding
/// rejects layers that are not all `width × height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DungeonData")]
pub struct Dungeon {
    pub width: i32,
    pub height: i32,
    #[serde(skip)]
    pub tree: Option<TreeNode>,
    pub layers: Layers,
    #[serde(skip)]
    pub warnings: Vec<PlacementWarning>,
}

impl Dungeon {
    /// Wrap bare layers, e.g. a hand-built or imported chunk
    pub fn from_layers(layers: Layers) -> Self {
        Self {
            width: layers.tiles.width(),
            height: layers.tiles.height(),
            tree: None,
            layers,
            warnings: Vec::new(),
        }
    }

    /// Id at `(x, y)` of `layer`
    pub fn get(&self, layer: Layer, x: i32, y: i32) -> Option<TileId> {
        self.layers[layer].get(x, y)
    }

    /// First cell of the props layer holding `prop`, row-major
    pub fn find_prop(&self, prop: TileId) -> Option<(i32, i32)> {
        self.layers
            .props
            .iter()
            .find(|&(_, _, id)| id == prop)
            .map(|(x, y, _)| (x, y))
    }

    /// All cells of the props layer holding `prop`, row-major
    pub fn find_props(&self, prop: TileId) -> Vec<(i32, i32)> {
        self.layers
            .props
            .iter()
            .filter(|&(_, _, id)| id == prop)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    /// First floor cell, row-major
    pub fn first_floor(&self) -> Option<(i32, i32)> {
        self.layers
            .tiles
            .iter()
            .find(|&(_, _, id)| id == FLOOR)
            .map(|(x, y, _)| (x, y))
    }
}

/// Serialized shape of a [`Dungeon`], checked on the way in
#[derive(Deserialize)]
struct DungeonData {
    width: i32,
    height: i32,
    layers: Layers,
}

impl TryFrom<DungeonData> for Dungeon {
    type Error = DungeonShapeError;

    fn try_from(DungeonData { width, height, layers }: DungeonData) -> Result<Self, Self::Error> {
        if width < 0 || height < 0 {
            return Err(DungeonShapeError::NegativeSize { width, height });
        }
        for layer in Layer::iter() {
            let map = &layers[layer];
            if map.width() != width || map.height() != height {
                return Err(DungeonShapeError::LayerSize {
                    layer,
                    width,
                    height,
                    found_width: map.width(),
                    found_height: map.height(),
                });
            }
        }
        Ok(Self {
            width,
            height,
            tree: None,
            layers,
            warnings: Vec::new(),
        })
    }
}

/// Generate a dungeon from `params` and `catalog`.
///
/// Deterministic: the same inputs always give the same layers, or the same
/// error.
pub fn generate(
    params: &GenerationParams,
    catalog: &TemplateCatalog,
) -> Result<Dungeon, ConfigurationError> {
    params.validate()?;
    catalog.validate()?;

    let mut rng = DungeonRng::new(&params.seed);
    log::debug!(
        "generating {}x{} dungeon with seed \"{}\" ({:#018x})",
        params.map_width,
        params.map_height,
        params.seed,
        rng.seed()
    );

    let mut tree = build_tree(params.root_area(), params.iterations, params, &mut rng);
    log::debug!(
        "partitioned into {} leaves (depth {}, {} corridors)",
        tree.leaves().len(),
        tree.depth(),
        tree.corridors().len()
    );

    let warnings = place_rooms(&mut tree, catalog, &mut rng)?;
    let layers = rasterize(&tree, params.map_width, params.map_height);

    log::info!(
        "generated dungeon \"{}\": {} rooms, {} warnings",
        params.seed,
        tree.rooms().len(),
        warnings.len()
    );

    Ok(Dungeon {
        width: params.map_width,
        height: params.map_height,
        tree: Some(tree),
        layers,
        warnings,
    })
}
