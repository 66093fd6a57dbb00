//! Tile id vocabulary shared by the generator, the linker and renderers.

/// A tile id as stored in a [`Tilemap`](crate::dungeon::Tilemap) cell.
pub type TileId = i32;

/// Open floor
pub const FLOOR: TileId = 0;

/// Raw solid wall, before autotiling
pub const WALL: TileId = 1;

/// Raw hole painted by template authors (any negative id is a hole)
pub const RAW_HOLE: TileId = -1;

/// Autotiled hole whose upper neighbor is not a hole (rendered as a ledge)
pub const HOLE_EDGE: TileId = -1;

/// Autotiled hole below another hole
pub const HOLE: TileId = -2;

/// Smallest autotiled wall variant id
pub const WALL_VARIANT_MIN: TileId = 1;

/// Largest autotiled wall variant id (the isolated pillar)
pub const WALL_VARIANT_MAX: TileId = 47;

/// Wall variant for a cell surrounded by walls on all eight sides
pub const WALL_SOLID: TileId = 46;

/// Empty cell in the props and monsters layers
pub const EMPTY: TileId = 0;

/// Default map size (tiles)
pub const DEFAULT_MAP_WIDTH: i32 = 40;
pub const DEFAULT_MAP_HEIGHT: i32 = 25;

/// Largest map accepted by parameter validation, in cells
pub const MAX_MAP_CELLS: i64 = 1 << 24;

/// Per-cell cost of digging through a wall when linking generated chunks
pub const DEFAULT_WALL_COST: u32 = 4;

/// Default tile edge length in world units
pub const DEFAULT_TILE_SIZE: f32 = 32.0;

/// Whether `id` is an autotiled wall variant
pub const fn is_wall_variant(id: TileId) -> bool {
    id >= WALL_VARIANT_MIN && id <= WALL_VARIANT_MAX
}

/// Whether `id` may appear in a `tiles` layer after rasterization
pub const fn is_resolved_tile(id: TileId) -> bool {
    id == FLOOR || id == HOLE_EDGE || id == HOLE || is_wall_variant(id)
}
