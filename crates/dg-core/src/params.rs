//! Generation parameters
//!
//! JSON keys are camelCase so parameter files written by the editing surface
//! load unchanged. Missing keys fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, MAX_MAP_CELLS};
use crate::dungeon::Rectangle;
use crate::error::ConfigurationError;
use crate::rng::Seed;

/// Tunable knobs of one generation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationParams {
    pub seed: Seed,
    /// Map width in tiles
    pub map_width: i32,
    /// Map height in tiles
    pub map_height: i32,
    /// Solid border kept around the partitioned area
    pub map_gutter_width: i32,
    /// Split depth budget; negative means unbounded
    pub iterations: i32,
    pub container_minimum_size: i32,
    pub container_minimum_ratio: f64,
    pub container_split_retries: u32,
    pub corridor_width: i32,
    /// Tile edge length in pixels/world units, used by chunk placement
    pub tile_width: i32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            seed: Seed::default(),
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            map_gutter_width: 2,
            iterations: 9,
            container_minimum_size: 4,
            container_minimum_ratio: 0.45,
            container_split_retries: 30,
            corridor_width: 4,
            tile_width: 32,
        }
    }
}

impl GenerationParams {
    /// Same parameters with another seed
    pub fn with_seed(&self, seed: impl Into<Seed>) -> Self {
        Self {
            seed: seed.into(),
            ..self.clone()
        }
    }

    /// The area handed to the partition builder: the map minus its gutter.
    ///
    /// A gutter wider than the map gives a non-positive size.
    pub fn root_area(&self) -> Rectangle {
        let border = self.map_gutter_width.saturating_mul(2);
        Rectangle::new(
            self.map_gutter_width,
            self.map_gutter_width,
            self.map_width.saturating_sub(border),
            self.map_height.saturating_sub(border),
        )
    }

    /// Reject parameter sets the generator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        fn invalid(name: &'static str, reason: String) -> Result<(), ConfigurationError> {
            Err(ConfigurationError::InvalidParameter { name, reason })
        }

        if self.map_width <= 0 || self.map_height <= 0 {
            return invalid(
                "mapWidth/mapHeight",
                format!("map must be non-empty, got {}x{}", self.map_width, self.map_height),
            );
        }
        if i64::from(self.map_width) * i64::from(self.map_height) > MAX_MAP_CELLS {
            return invalid(
                "mapWidth/mapHeight",
                format!(
                    "{}x{} exceeds {MAX_MAP_CELLS} cells",
                    self.map_width, self.map_height
                ),
            );
        }
        if self.map_gutter_width < 0 {
            return invalid("mapGutterWidth", format!("must not be negative, got {}", self.map_gutter_width));
        }
        let area = self.root_area();
        if area.width <= 0 || area.height <= 0 {
            return invalid(
                "mapGutterWidth",
                format!(
                    "gutter {} leaves no room in a {}x{} map",
                    self.map_gutter_width, self.map_width, self.map_height
                ),
            );
        }
        if self.container_minimum_size < 1 {
            return invalid(
                "containerMinimumSize",
                format!("must be at least 1, got {}", self.container_minimum_size),
            );
        }
        if !self.container_minimum_ratio.is_finite() || self.container_minimum_ratio < 0.0 {
            return invalid(
                "containerMinimumRatio",
                format!("must be a finite non-negative number, got {}", self.container_minimum_ratio),
            );
        }
        if self.corridor_width < 1 {
            return invalid("corridorWidth", format!("must be at least 1, got {}", self.corridor_width));
        }
        if self.tile_width < 1 {
            return invalid("tileWidth", format!("must be at least 1, got {}", self.tile_width));
        }
        Ok(())
    }
}
