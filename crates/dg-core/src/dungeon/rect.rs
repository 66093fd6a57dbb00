//! Integer rectangles used for containers, rooms and corridors.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in tile coordinates.
///
/// `x`/`y` is the top-left cell; `right`/`bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Float midpoint
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }

    /// Midpoint rounded up on both axes (`ceil(center)`), in exact integer math.
    pub const fn center_ceil(&self) -> (i32, i32) {
        (
            self.x + self.width.div_euclid(2) + self.width.rem_euclid(2),
            self.y + self.height.div_euclid(2) + self.height.rem_euclid(2),
        )
    }

    /// Exclusive right edge
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Check if the cell `(x, y)` lies inside
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if `other` lies entirely inside this rectangle
    pub const fn contains_rect(&self, other: &Rectangle) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check if the two rectangles share at least one cell
    pub const fn intersects(&self, other: &Rectangle) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Iterate over every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (x0, x1) = (self.x, self.right());
        (self.y..self.bottom()).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }
}
