//! Neighbor-aware wall and hole autotiling
//!
//! Every wall cell is replaced by one of 47 variants chosen from which of its
//! eight neighbors are walls too. A diagonal neighbor only counts when both
//! cardinals next to it are walls, which folds the 256 raw configurations
//! onto 47 distinct shapes. Cells past the map edge count as walls.
//!
//! Holes are replaced by `HOLE` when the cell above is a hole as well and by
//! `HOLE_EDGE` otherwise, so renderers can draw the ledge on the top row.

use bitflags::bitflags;

use crate::consts::{HOLE, HOLE_EDGE, TileId, WALL_SOLID};

use super::tilemap::Tilemap;

bitflags! {
    /// Which neighbors of a wall cell are walls
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Neighbors: u8 {
        const NORTH_WEST = 1;
        const NORTH = 2;
        const NORTH_EAST = 4;
        const WEST = 8;
        const EAST = 16;
        const SOUTH_WEST = 32;
        const SOUTH = 64;
        const SOUTH_EAST = 128;
    }
}

/// Cardinal offsets paired with their flag
const CARDINALS: [(i32, i32, Neighbors); 4] = [
    (0, -1, Neighbors::NORTH),
    (-1, 0, Neighbors::WEST),
    (1, 0, Neighbors::EAST),
    (0, 1, Neighbors::SOUTH),
];

/// Diagonal offsets, their flag and the two cardinals they require
const DIAGONALS: [(i32, i32, Neighbors, Neighbors); 4] = [
    (-1, -1, Neighbors::NORTH_WEST, Neighbors::NORTH.union(Neighbors::WEST)),
    (1, -1, Neighbors::NORTH_EAST, Neighbors::NORTH.union(Neighbors::EAST)),
    (-1, 1, Neighbors::SOUTH_WEST, Neighbors::SOUTH.union(Neighbors::WEST)),
    (1, 1, Neighbors::SOUTH_EAST, Neighbors::SOUTH.union(Neighbors::EAST)),
];

/// Whether the cell at `(x, y)` blocks: any wall, or anything off the grid
fn collides(tiles: &Tilemap, x: i32, y: i32) -> bool {
    tiles.get(x, y).is_none_or(|id| id > 0)
}

/// Compute the reduced neighbor mask of the cell at `(x, y)`.
pub fn compute_mask(tiles: &Tilemap, x: i32, y: i32) -> Neighbors {
    let mut mask = Neighbors::empty();
    for (dx, dy, flag) in CARDINALS {
        if collides(tiles, x + dx, y + dy) {
            mask |= flag;
        }
    }
    for (dx, dy, flag, needs) in DIAGONALS {
        if mask.contains(needs) && collides(tiles, x + dx, y + dy) {
            mask |= flag;
        }
    }
    mask
}

/// Wall variant for a reduced neighbor mask.
///
/// Returns `None` for masks that cannot come out of [`compute_mask`]
/// (a diagonal set without both of its cardinals).
pub fn wall_variant(mask: Neighbors) -> Option<TileId> {
    let id = match mask.bits() {
        2 => 1,
        8 => 2,
        10 => 3,
        11 => 4,
        16 => 5,
        18 => 6,
        22 => 7,
        24 => 8,
        26 => 9,
        27 => 10,
        30 => 11,
        31 => 12,
        64 => 13,
        66 => 14,
        72 => 15,
        74 => 16,
        75 => 17,
        80 => 18,
        82 => 19,
        86 => 20,
        88 => 21,
        90 => 22,
        91 => 23,
        94 => 24,
        95 => 25,
        104 => 26,
        106 => 27,
        107 => 28,
        120 => 29,
        122 => 30,
        123 => 31,
        126 => 32,
        127 => 33,
        208 => 34,
        210 => 35,
        214 => 36,
        216 => 37,
        218 => 38,
        219 => 39,
        222 => 40,
        223 => 41,
        248 => 42,
        250 => 43,
        251 => 44,
        254 => 45,
        255 => 46,
        0 => 47,
        _ => return None,
    };
    Some(id)
}

/// Resolved id of the cell at `(x, y)` of a raw grid.
///
/// Floor stays floor. Off-grid coordinates give `None`.
pub fn resolve_cell(tiles: &Tilemap, x: i32, y: i32) -> Option<TileId> {
    let id = tiles.get(x, y)?;
    let resolved = if id > 0 {
        let mask = compute_mask(tiles, x, y);
        let variant = wall_variant(mask);
        debug_assert!(variant.is_some(), "reduced mask {:#010b} has no wall variant", mask.bits());
        variant.unwrap_or(WALL_SOLID)
    } else if id < 0 {
        if tiles.get(x, y - 1).is_some_and(|above| above < 0) {
            HOLE
        } else {
            HOLE_EDGE
        }
    } else {
        id
    };
    Some(resolved)
}

/// Autotile a whole grid.
///
/// Reads `tiles` as an immutable snapshot and returns a fresh grid.
pub fn autotile(tiles: &Tilemap) -> Tilemap {
    let mut out = tiles.clone();
    for (x, y, _) in tiles.iter() {
        if let Some(id) = resolve_cell(tiles, x, y) {
            out.set(x, y, id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FLOOR, WALL, WALL_SOLID, is_resolved_tile};

    #[test]
    fn test_every_reachable_mask_has_a_variant() {
        // Build every raw 3x3 neighborhood around a center wall
        let mut seen = std::collections::BTreeSet::new();
        for raw in 0u16..256 {
            let mut grid = Tilemap::new(3, 3, FLOOR);
            grid.set(1, 1, WALL);
            let cells = [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)];
            for (bit, (x, y)) in cells.iter().enumerate() {
                if raw & (1 << bit) != 0 {
                    grid.set(*x, *y, WALL);
                }
            }
            let mask = compute_mask(&grid, 1, 1);
            let variant = wall_variant(mask);
            assert!(variant.is_some(), "mask {:#010b} from raw {raw}", mask.bits());
            assert_eq!(resolve_cell(&grid, 1, 1), variant);
            seen.insert(variant.unwrap_or_default());
        }
        assert_eq!(seen.len(), 47);
        assert_eq!(seen.first(), Some(&1));
        assert_eq!(seen.last(), Some(&47));
    }

    #[test]
    fn test_unreachable_mask() {
        assert_eq!(wall_variant(Neighbors::NORTH_WEST), None);
        assert_eq!(wall_variant(Neighbors::all()), Some(WALL_SOLID));
        assert_eq!(wall_variant(Neighbors::empty()), Some(47));
    }

    #[test]
    fn test_diagonal_needs_both_cardinals() {
        let grid = Tilemap::from_rows(vec![
            vec![1, 0, 0],
            vec![0, 1, 0],
            vec![0, 0, 0],
        ])
        .unwrap();
        assert_eq!(compute_mask(&grid, 1, 1), Neighbors::empty());
    }

    #[test]
    fn test_off_grid_is_solid() {
        let grid = Tilemap::new(1, 1, WALL);
        assert_eq!(compute_mask(&grid, 0, 0), Neighbors::all());
        assert_eq!(autotile(&grid).get(0, 0), Some(WALL_SOLID));
    }

    #[test]
    fn test_holes() {
        let grid = Tilemap::from_rows(vec![
            vec![0, -1, 0],
            vec![0, -1, -5],
            vec![0, 0, -1],
        ])
        .unwrap();
        let out = autotile(&grid);
        assert_eq!(out.get(1, 0), Some(HOLE_EDGE));
        assert_eq!(out.get(1, 1), Some(HOLE));
        assert_eq!(out.get(2, 1), Some(HOLE_EDGE));
        assert_eq!(out.get(2, 2), Some(HOLE));
    }

    #[test]
    fn test_reads_snapshot() {
        // Row of walls with floor below: every wall sees its raw neighbors
        let grid = Tilemap::from_rows(vec![vec![1, 1, 1], vec![0, 0, 0]]).unwrap();
        let out = autotile(&grid);
        // middle: N, W, E set (off-grid above), NW and NE off-grid -> 31
        assert_eq!(out.get(1, 0), Some(12));
        assert!(out.all(is_resolved_tile));
        assert_eq!(grid.get(1, 0), Some(WALL));
    }
}
