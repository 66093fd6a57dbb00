//! JSON import and export
//!
//! Dungeons are written as `{ width, height, layers: { tiles, props, monsters } }`.
//! Catalogs and parameter files use the shapes of the editing surface.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::dungeon::{Dungeon, TemplateCatalog};
use crate::error::SaveError;
use crate::params::GenerationParams;

/// Serialize a dungeon to compact JSON
pub fn to_json(dungeon: &Dungeon) -> Result<String, SaveError> {
    Ok(serde_json::to_string(dungeon)?)
}

/// Serialize a dungeon to indented JSON
pub fn to_json_pretty(dungeon: &Dungeon) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(dungeon)?)
}

/// Parse a dungeon. The partition tree is not restored.
pub fn from_json(json: &str) -> Result<Dungeon, SaveError> {
    Ok(serde_json::from_str(json)?)
}

/// Write a dungeon to a file
pub fn save_dungeon(dungeon: &Dungeon, path: impl AsRef<Path>, pretty: bool) -> Result<(), SaveError> {
    let writer = BufWriter::new(File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(writer, dungeon)?;
    } else {
        serde_json::to_writer(writer, dungeon)?;
    }
    Ok(())
}

/// Load a dungeon from a file
pub fn load_dungeon(path: impl AsRef<Path>) -> Result<Dungeon, SaveError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Load and validate a template catalog
pub fn load_catalog(path: impl AsRef<Path>) -> Result<TemplateCatalog, SaveError> {
    let reader = BufReader::new(File::open(path)?);
    let catalog: TemplateCatalog = serde_json::from_reader(reader)?;
    catalog.validate()?;
    Ok(catalog)
}

/// Load and validate generation parameters
pub fn load_params(path: impl AsRef<Path>) -> Result<GenerationParams, SaveError> {
    let reader = BufReader::new(File::open(path)?);
    let params: GenerationParams = serde_json::from_reader(reader)?;
    params.validate()?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Layers;

    #[test]
    fn test_json_shape() {
        let mut layers = Layers::new(2, 1, 46);
        layers.tiles.set(1, 0, 0);
        layers.monsters.set(0, 0, 7);
        let dungeon = Dungeon::from_layers(layers);

        let json = to_json(&dungeon).unwrap();
        assert_eq!(
            json,
            r#"{"width":2,"height":1,"layers":{"tiles":[[46,0]],"props":[[0,0]],"monsters":[[7,0]]}}"#
        );
        let back = from_json(&json).unwrap();
        assert_eq!(back.layers, dungeon.layers);
        assert!(back.tree.is_none());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(from_json("{"), Err(SaveError::Serialization(_))));
        assert!(matches!(
            from_json(r#"{"width":2,"height":2,"layers":{"tiles":[[1,1],[1]],"props":[],"monsters":[]}}"#),
            Err(SaveError::Serialization(_))
        ));
    }

    #[test]
    fn test_inconsistent_layers_rejected() {
        let json = r#"{"width":1,"height":1,"layers":{"tiles":[[0]],"props":[[0,0],[0,0]],"monsters":[[0]]}}"#;
        assert!(matches!(from_json(json), Err(SaveError::Serialization(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_dungeon("/nonexistent/dungeon.json"),
            Err(SaveError::Io(_))
        ));
    }
}
