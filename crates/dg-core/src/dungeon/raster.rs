//! Rasterization of a placed partition tree into tile layers
//!
//! Each stage takes its grid by value and hands back the transformed grid.

use crate::consts::{FLOOR, WALL};

use super::autotile::autotile;
use super::tilemap::{Layers, Tilemap};
use super::tree::TreeNode;

/// Turn every corridor cell into floor, depth first.
pub fn carve_corridors(node: &TreeNode, mut tiles: Tilemap) -> Tilemap {
    node.walk(&mut |n| {
        if let Some(corridor) = n.leaf.corridor.as_ref() {
            for (x, y) in corridor.rect.cells() {
                tiles.set(x, y, FLOOR);
            }
        }
    });
    tiles
}

/// Copy every room's template layers onto the map at the room position.
///
/// Template data overwrites whatever is there; cells past the map edge are
/// dropped.
pub fn carve_rooms(node: &TreeNode, mut layers: Layers) -> Layers {
    for room in node.rooms() {
        let template = &room.template.layers;
        layers.tiles.stamp(room.x, room.y, &template.tiles);
        layers.props.stamp(room.x, room.y, &template.props);
        layers.monsters.stamp(room.x, room.y, &template.monsters);
    }
    layers
}

/// Rasterize `tree` into a `width × height` map: solid rock, corridors,
/// rooms, then autotiling of the `tiles` layer.
pub fn rasterize(tree: &TreeNode, width: i32, height: i32) -> Layers {
    let Layers {
        tiles,
        props,
        monsters,
    } = Layers::new(width, height, WALL);

    let tiles = carve_corridors(tree, tiles);
    let layers = carve_rooms(
        tree,
        Layers {
            tiles,
            props,
            monsters,
        },
    );

    Layers {
        tiles: autotile(&layers.tiles),
        ..layers
    }
}
