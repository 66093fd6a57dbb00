//! Text preview of a dungeon
//!
//! Monsters are drawn over props, props over tiles.

use dg_core::data::{MonsterKind, PropKind};
use dg_core::{Dungeon, FLOOR, HOLE, HOLE_EDGE, TileId, is_wall_variant};

fn tile_glyph(id: TileId) -> char {
    match id {
        FLOOR => '.',
        HOLE_EDGE => '_',
        HOLE => ' ',
        id if is_wall_variant(id) => '#',
        _ => '?',
    }
}

/// Glyph of one cell
pub fn glyph(dungeon: &Dungeon, x: i32, y: i32) -> char {
    let layers = &dungeon.layers;
    if let Some(monster) = layers.monsters.get(x, y).and_then(MonsterKind::from_id) {
        return monster.glyph();
    }
    if let Some(prop) = layers.props.get(x, y).and_then(PropKind::from_id) {
        return prop.glyph();
    }
    layers.tiles.get(x, y).map_or(' ', tile_glyph)
}

/// Render the whole dungeon, one line per row
pub fn render(dungeon: &Dungeon) -> String {
    let width = usize::try_from(dungeon.width).unwrap_or(0);
    let height = usize::try_from(dungeon.height).unwrap_or(0);
    let mut out = String::with_capacity((width + 1).saturating_mul(height));
    for y in 0..dungeon.height {
        out.extend((0..dungeon.width).map(|x| glyph(dungeon, x, y)));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::dungeon::Layers;
    use dg_core::{DOOR_MARKER, SPAWN_MARKER};

    #[test]
    fn test_render_layers_in_order() {
        let mut layers = Layers::new(4, 2, FLOOR);
        layers.tiles.set(0, 0, 46);
        layers.tiles.set(1, 0, HOLE);
        layers.tiles.set(2, 0, HOLE_EDGE);
        layers.props.set(0, 1, SPAWN_MARKER);
        layers.props.set(1, 1, DOOR_MARKER);
        layers.props.set(2, 1, DOOR_MARKER);
        layers.monsters.set(2, 1, MonsterKind::Troll.id());

        let dungeon = Dungeon::from_layers(layers);
        assert_eq!(render(&dungeon), "# _.\n<>T.\n");
    }

    #[test]
    fn test_render_negative_size_is_empty() {
        let mut dungeon = Dungeon::from_layers(Layers::new(2, 1, FLOOR));
        dungeon.width = -2;
        assert_eq!(render(&dungeon), "\n");
    }
}
