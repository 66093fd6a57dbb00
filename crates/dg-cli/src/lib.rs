//! Support code for the `dungen` binary

pub mod ascii;
pub mod logging;

use dg_core::link::Direction;
use dg_core::{ConfigurationError, DOOR_MARKER, Dungeon, LinkFailure, SaveError, TemplateCatalog};
use thiserror::Error;

/// Catalog used when no `--rooms` file is given
pub const DEFAULT_ROOMS: &str = include_str!("../assets/rooms.json");

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("link failed: {0}")]
    Link(#[from] LinkFailure),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("chunk has no exit marker to leave through {0}")]
    NoExit(Direction),
}

/// Parse and validate the embedded catalog
pub fn default_catalog() -> Result<TemplateCatalog, CliError> {
    let catalog: TemplateCatalog = serde_json::from_str(DEFAULT_ROOMS)?;
    catalog.validate()?;
    Ok(catalog)
}

/// The exit marker closest to the `direction` edge of `chunk`.
///
/// Ties keep the first marker in row-major order.
pub fn exit_toward(chunk: &Dungeon, direction: Direction) -> Option<(i32, i32)> {
    chunk
        .find_props(DOOR_MARKER)
        .into_iter()
        .min_by_key(|&(x, y)| match direction {
            Direction::Top => y,
            Direction::Right => chunk.width - 1 - x,
            Direction::Bottom => chunk.height - 1 - y,
            Direction::Left => x,
        })
}
