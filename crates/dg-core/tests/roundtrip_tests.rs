//! JSON import/export of dungeons, catalogs and parameters

use dg_core::save::{from_json, load_catalog, load_dungeon, load_params, save_dungeon, to_json};
use dg_core::{GenerationParams, RoomTemplate, RoomType, SaveError, Seed, TemplateCatalog, generate};

fn catalog() -> TemplateCatalog {
    [
        RoomTemplate::walled("boss", RoomType::Boss, 5, 5),
        RoomTemplate::walled("entrance", RoomType::Entrance, 4, 4).with_prop(1, 1, 21),
        RoomTemplate::walled("heal", RoomType::Heal, 4, 4),
        RoomTemplate::walled("treasure", RoomType::Treasure, 4, 4),
        RoomTemplate::walled("monsters", RoomType::Monsters, 3, 3),
    ]
    .into_iter()
    .collect()
}

fn params() -> GenerationParams {
    GenerationParams {
        seed: Seed::from("roundtrip"),
        map_width: 48,
        map_height: 48,
        container_split_retries: 500,
        ..Default::default()
    }
}

fn scratch(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("dg-core-{}-{name}", std::process::id()))
}

#[test]
fn test_generated_dungeon_roundtrip() {
    let dungeon = generate(&params(), &catalog()).unwrap();
    let parsed = from_json(&to_json(&dungeon).unwrap()).unwrap();

    assert_eq!(parsed.layers, dungeon.layers);
    assert_eq!((parsed.width, parsed.height), (48, 48));
    assert!(parsed.tree.is_none());
}

#[test]
fn test_file_roundtrip() {
    let dungeon = generate(&params(), &catalog()).unwrap();
    let path = scratch("dungeon.json");

    save_dungeon(&dungeon, &path, true).unwrap();
    let loaded = load_dungeon(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.layers, dungeon.layers);
}

#[test]
fn test_catalog_and_params_files() {
    let catalog_path = scratch("rooms.json");
    std::fs::write(&catalog_path, serde_json::to_string(&catalog()).unwrap()).unwrap();
    let params_path = scratch("params.json");
    std::fs::write(&params_path, r#"{ "seed": "roundtrip", "mapWidth": 48, "mapHeight": 48, "containerSplitRetries": 500 }"#)
        .unwrap();

    let loaded_catalog = load_catalog(&catalog_path).unwrap();
    let loaded_params = load_params(&params_path).unwrap();
    std::fs::remove_file(&catalog_path).unwrap();
    std::fs::remove_file(&params_path).unwrap();

    assert_eq!(loaded_catalog, catalog());
    assert_eq!(loaded_params, params());
    assert_eq!(
        generate(&loaded_params, &loaded_catalog).unwrap().layers,
        generate(&params(), &catalog()).unwrap().layers
    );
}

#[test]
fn test_invalid_params_file() {
    let path = scratch("bad-params.json");
    std::fs::write(&path, r#"{ "corridorWidth": 0 }"#).unwrap();
    let err = load_params(&path).unwrap_err();
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(err, SaveError::Configuration(_)));
}
