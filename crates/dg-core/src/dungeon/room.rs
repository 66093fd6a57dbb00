//! Room types, templates and placed rooms
//!
//! Templates are pre-authored, read-only blueprints supplied by the editing
//! surface. A placed [`Room`] shares its template through an `Arc`; the
//! generator never copies or mutates template data.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::consts::{FLOOR, TileId, WALL};
use crate::error::ConfigurationError;

use super::rect::Rectangle;
use super::tilemap::{Layers, Tilemap};

/// Closed set of room roles
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoomType {
    /// Where the player starts
    Entrance,
    /// Filler rooms occupying every leaf left after the unique rooms
    Monsters,
    Heal,
    Treasure,
    Boss,
}

impl RoomType {
    /// Types that must appear exactly once per dungeon
    pub const REQUIRED: [RoomType; 4] = [
        RoomType::Entrance,
        RoomType::Heal,
        RoomType::Treasure,
        RoomType::Boss,
    ];

    pub fn is_required(self) -> bool {
        !matches!(self, RoomType::Monsters)
    }
}

/// A pre-authored, fixed-size room blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTemplate {
    #[serde(default)]
    pub id: String,
    pub width: i32,
    pub height: i32,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub layers: Layers,
}

impl RoomTemplate {
    /// Build a template whose size is taken from its `tiles` layer
    pub fn new(id: impl Into<String>, room_type: RoomType, layers: Layers) -> Self {
        Self {
            id: id.into(),
            width: layers.tiles.width(),
            height: layers.tiles.height(),
            room_type,
            layers,
        }
    }

    /// A rectangular room: wall border, floor inside, no props or monsters
    pub fn walled(id: impl Into<String>, room_type: RoomType, width: i32, height: i32) -> Self {
        let mut layers = Layers::new(width, height, WALL);
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                layers.tiles.set(x, y, FLOOR);
            }
        }
        Self::new(id, room_type, layers)
    }

    /// Same template with one prop painted at `(x, y)`
    pub fn with_prop(mut self, x: i32, y: i32, prop: TileId) -> Self {
        self.layers.props.set(x, y, prop);
        self
    }

    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Whether the template fits in a `width × height` container
    pub fn fits(&self, width: i32, height: i32) -> bool {
        self.width <= width && self.height <= height
    }

    pub fn tiles(&self) -> &Tilemap {
        &self.layers.tiles
    }

    /// Check declared size against the layer data
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigurationError::MalformedTemplate {
                id: self.id.clone(),
                reason: format!("non-positive size {}x{}", self.width, self.height),
            });
        }
        if !self.layers.has_size(self.width, self.height) {
            return Err(ConfigurationError::MalformedTemplate {
                id: self.id.clone(),
                reason: format!("layers do not match declared size {}x{}", self.width, self.height),
            });
        }
        Ok(())
    }
}

/// The ordered template catalog handed to the generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateCatalog {
    templates: Vec<Arc<RoomTemplate>>,
}

impl TemplateCatalog {
    pub fn new(templates: impl IntoIterator<Item = RoomTemplate>) -> Self {
        Self {
            templates: templates.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn push(&mut self, template: RoomTemplate) {
        self.templates.push(Arc::new(template));
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<RoomTemplate>> {
        self.templates.iter()
    }

    /// Templates of one type, in catalog order
    pub fn of_type(&self, room_type: RoomType) -> Vec<Arc<RoomTemplate>> {
        self.templates
            .iter()
            .filter(|t| t.room_type == room_type)
            .cloned()
            .collect()
    }

    /// Validate every template
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.templates.iter().try_for_each(|t| t.validate())
    }
}

impl FromIterator<RoomTemplate> for TemplateCatalog {
    fn from_iter<I: IntoIterator<Item = RoomTemplate>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A template instantiated inside a container.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub template: Arc<RoomTemplate>,
}

impl Room {
    pub fn new(x: i32, y: i32, template: Arc<RoomTemplate>) -> Self {
        Self { x, y, template }
    }

    /// Center `template` inside `container`, flooring half-cells
    pub fn centered_in(container: &Rectangle, template: Arc<RoomTemplate>) -> Self {
        let x = (2 * container.x + container.width - template.width).div_euclid(2);
        let y = (2 * container.y + container.height - template.height).div_euclid(2);
        Self::new(x, y, template)
    }

    pub fn room_type(&self) -> RoomType {
        self.template.room_type
    }

    /// Footprint on the map
    pub fn rect(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.template.width, self.template.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_room_type_names() {
        assert_eq!(RoomType::Boss.to_string(), "boss");
        assert_eq!(RoomType::from_str("heal").unwrap(), RoomType::Heal);
        let parsed: RoomType = serde_json::from_str("\"treasure\"").unwrap();
        assert_eq!(parsed, RoomType::Treasure);
        assert!(!RoomType::Monsters.is_required());
        assert!(RoomType::REQUIRED.iter().all(|t| t.is_required()));
    }

    #[test]
    fn test_walled_template() {
        let t = RoomTemplate::walled("a", RoomType::Heal, 4, 3);
        assert_eq!((t.width, t.height), (4, 3));
        assert_eq!(t.tiles().get(0, 0), Some(WALL));
        assert_eq!(t.tiles().get(1, 1), Some(FLOOR));
        assert_eq!(t.tiles().get(2, 1), Some(FLOOR));
        assert_eq!(t.tiles().get(1, 2), Some(WALL));
        assert!(t.validate().is_ok());
        assert!(t.fits(4, 3));
        assert!(!t.fits(3, 3));
    }

    #[test]
    fn test_mismatched_layers_rejected() {
        let mut t = RoomTemplate::walled("bad", RoomType::Boss, 3, 3);
        t.width = 5;
        assert!(matches!(
            t.validate(),
            Err(ConfigurationError::MalformedTemplate { ref id, .. }) if id == "bad"
        ));
    }

    #[test]
    fn test_centering_floors() {
        let template = Arc::new(RoomTemplate::walled("t", RoomType::Monsters, 3, 3));
        let room = Room::centered_in(&Rectangle::new(2, 2, 6, 4), template);
        // center (5, 4) - 1.5 -> floor(3.5) = 3, floor(2.5) = 2
        assert_eq!((room.x, room.y), (3, 2));
        assert!(Rectangle::new(2, 2, 6, 4).contains_rect(&room.rect()));
    }

    #[test]
    fn test_catalog_json_shape() {
        let json = r#"[{
            "id": "r1", "width": 2, "height": 1, "type": "boss",
            "layers": { "tiles": [[1, 0]], "props": [[0, 0]], "monsters": [[0, 7]] }
        }]"#;
        let catalog: TemplateCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.of_type(RoomType::Boss).len(), 1);
        assert!(catalog.of_type(RoomType::Heal).is_empty());
    }
}
