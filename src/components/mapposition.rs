
/// World-space position in pixels (the effect's center).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPosition {
    pub x: f32,
    pub y: f32,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Tile coordinates on a specific map, used to place positional sound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapLocation {
    pub tile_x: i32,
    pub tile_y: i32,
    pub map_id: i32,
}

impl MapLocation {
    pub fn new(tile_x: i32, tile_y: i32, map_id: i32) -> Self {
        Self {
            tile_x,
            tile_y,
            map_id,
        }
    }
}
