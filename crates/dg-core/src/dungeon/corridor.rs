//! Corridor synthesis between sibling containers
//!
//! Every internal node of the partition tree carries one straight corridor
//! joining the centers of its two children. Corridors are computed from the
//! child *containers*, before any room is placed.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::rect::Rectangle;
use super::tree::Container;

/// Orientation of a corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CorridorDirection {
    Horizontal,
    Vertical,
}

/// A straight rectangular corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corridor {
    pub rect: Rectangle,
}

impl Corridor {
    pub const fn new(rect: Rectangle) -> Self {
        Self { rect }
    }

    /// `Horizontal` if wider than tall, else `Vertical`
    pub const fn direction(&self) -> CorridorDirection {
        if self.rect.width > self.rect.height {
            CorridorDirection::Horizontal
        } else {
            CorridorDirection::Vertical
        }
    }
}

/// Build the corridor joining `left` to `right`.
///
/// Centers sharing an x coordinate give a vertical corridor running from the
/// left center down to the right center; any other layout gives a horizontal
/// one. Diagonal layouts are not bridged.
pub fn synthesize(left: &Container, right: &Container, corridor_width: i32) -> Corridor {
    let (left_cx, _) = left.rect.center();
    let (right_cx, _) = right.rect.center();
    let (x, y) = left.rect.center_ceil();
    let (right_x, right_y) = right.rect.center_ceil();
    let half = corridor_width / 2 + corridor_width % 2;

    let rect = if left_cx == right_cx {
        Rectangle::new(x - half, y - half, corridor_width, right_y - y)
    } else {
        Rectangle::new(x - half, y - half, right_x - x, corridor_width)
    };

    Corridor::new(rect)
}
