//! Room placement
//!
//! Fills the leaves of a partition tree with rooms, one type at a time:
//! boss, entrance, heal and treasure get exactly one room each, then every
//! leaf still empty receives a monsters room.

use core::cmp::Reverse;
use std::sync::Arc;

use hashbrown::HashSet;

use crate::error::{ConfigurationError, PlacementWarning};
use crate::rng::DungeonRng;

use super::rect::Rectangle;
use super::room::{Room, RoomTemplate, RoomType, TemplateCatalog};
use super::tree::{Container, TreeNode};

/// How many rooms of a type to place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quota {
    Exactly(usize),
    /// One per leaf still empty
    Remaining,
}

/// Type passes in the order they run
pub const PLACEMENT_ORDER: [(RoomType, Quota); 5] = [
    (RoomType::Boss, Quota::Exactly(1)),
    (RoomType::Entrance, Quota::Exactly(1)),
    (RoomType::Heal, Quota::Exactly(1)),
    (RoomType::Treasure, Quota::Exactly(1)),
    (RoomType::Monsters, Quota::Remaining),
];

/// Place rooms into the leaves of `tree`.
///
/// Returns the leaves no template could fit; those are left empty. Fails when
/// a type has no template at all, or when a required type finds no empty leaf.
pub fn place_rooms(
    tree: &mut TreeNode,
    catalog: &TemplateCatalog,
    rng: &mut DungeonRng,
) -> Result<Vec<PlacementWarning>, ConfigurationError> {
    let mut warnings = Vec::new();
    for (room_type, quota) in PLACEMENT_ORDER {
        fill_by_type(tree, catalog, room_type, quota, rng, &mut warnings)?;
    }
    Ok(warnings)
}

/// Run one type pass.
pub fn fill_by_type(
    tree: &mut TreeNode,
    catalog: &TemplateCatalog,
    room_type: RoomType,
    quota: Quota,
    rng: &mut DungeonRng,
    warnings: &mut Vec<PlacementWarning>,
) -> Result<(), ConfigurationError> {
    let templates = ranked(catalog.of_type(room_type));
    if templates.is_empty() {
        return Err(ConfigurationError::MissingTemplates { room_type });
    }

    let mut leaves: Vec<&mut Container> = tree
        .leaves_mut()
        .into_iter()
        .filter(|c| c.room.is_none())
        .collect();

    let count = match quota {
        Quota::Exactly(n) => n,
        Quota::Remaining => leaves.len(),
    };
    if count > 0 && leaves.is_empty() {
        return Err(ConfigurationError::NoEmptyContainers { room_type, count });
    }

    let mut used: HashSet<String> = HashSet::new();
    for _ in 0..count {
        if leaves.is_empty() {
            break;
        }
        let pick = rng.index(leaves.len());
        let container = leaves.remove(pick);

        match best_fit(&templates, &used, &container.rect) {
            Some(i) => {
                used.insert(templates[i].id.clone());
                let room = Room::centered_in(&container.rect, Arc::clone(&templates[i]));
                log::trace!(
                    "placed {} room \"{}\" at ({}, {}) in container {}",
                    room_type,
                    room.template.id,
                    room.x,
                    room.y,
                    container.id
                );
                container.room = Some(room);
            }
            None => {
                let warning = PlacementWarning {
                    container: container.id,
                    width: container.rect.width,
                    height: container.rect.height,
                    room_type,
                };
                log::warn!("{warning}");
                warnings.push(warning);
            }
        }
    }

    Ok(())
}

/// Largest area first; ties by width, then height, then catalog order.
fn ranked(mut templates: Vec<Arc<RoomTemplate>>) -> Vec<Arc<RoomTemplate>> {
    templates.sort_by_key(|t| (Reverse(t.area()), Reverse(t.width), Reverse(t.height)));
    templates
}

/// Index of the first fitting template whose id is unused, else the first
/// fitting one. Templates sharing an id count as one.
fn best_fit(templates: &[Arc<RoomTemplate>], used: &HashSet<String>, area: &Rectangle) -> Option<usize> {
    let fits = |t: &Arc<RoomTemplate>| t.fits(area.width, area.height);
    templates
        .iter()
        .position(|t| !used.contains(&t.id) && fits(t))
        .or_else(|| templates.iter().position(fits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::ContainerId;

    /// A right-leaning tree whose leaves are `rects`, in order.
    fn comb(rects: &[Rectangle]) -> TreeNode {
        let mut id = 100;
        let mut node = TreeNode::new(Container::new(ContainerId(0), rects[rects.len() - 1]));
        for rect in rects[..rects.len() - 1].iter().rev() {
            id += 1;
            node = TreeNode::with_children(
                Container::new(ContainerId(id), *rect),
                TreeNode::new(Container::new(ContainerId(id + 50), *rect)),
                node,
            );
        }
        node
    }

    fn row_of(n: i32, size: i32) -> Vec<Rectangle> {
        (0..n).map(|i| Rectangle::new(i * size, 0, size, size)).collect()
    }

    fn full_catalog(size: i32) -> TemplateCatalog {
        [
            RoomType::Entrance,
            RoomType::Monsters,
            RoomType::Heal,
            RoomType::Treasure,
            RoomType::Boss,
        ]
        .into_iter()
        .map(|t| RoomTemplate::walled(t.to_string(), t, size, size))
        .collect()
    }

    fn count_of(tree: &TreeNode, room_type: RoomType) -> usize {
        tree.rooms().iter().filter(|r| r.room_type() == room_type).count()
    }

    #[test]
    fn test_every_type_placed() {
        let mut tree = comb(&row_of(7, 6));
        let mut rng = DungeonRng::from_u64(1);
        let warnings = place_rooms(&mut tree, &full_catalog(3), &mut rng).unwrap();

        assert!(warnings.is_empty());
        for t in RoomType::REQUIRED {
            assert_eq!(count_of(&tree, t), 1, "{t}");
        }
        assert_eq!(count_of(&tree, RoomType::Monsters), 3);
        for leaf in tree.leaves() {
            let room = leaf.room.as_ref().unwrap();
            assert!(leaf.rect.contains_rect(&room.rect()));
        }
    }

    #[test]
    fn test_exactly_four_leaves_leaves_no_monsters() {
        let mut tree = comb(&row_of(4, 6));
        let mut rng = DungeonRng::from_u64(2);
        let warnings = place_rooms(&mut tree, &full_catalog(3), &mut rng).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(count_of(&tree, RoomType::Monsters), 0);
        assert_eq!(tree.rooms().len(), 4);
    }

    #[test]
    fn test_missing_templates() {
        let catalog: TemplateCatalog = [RoomTemplate::walled("e", RoomType::Entrance, 3, 3)]
            .into_iter()
            .collect();
        let mut tree = comb(&row_of(5, 6));
        let err = place_rooms(&mut tree, &catalog, &mut DungeonRng::from_u64(0)).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingTemplates {
                room_type: RoomType::Boss
            }
        );
    }

    #[test]
    fn test_too_few_leaves() {
        let mut tree = comb(&row_of(2, 6));
        let err = place_rooms(&mut tree, &full_catalog(3), &mut DungeonRng::from_u64(0)).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::NoEmptyContainers {
                room_type: RoomType::Heal,
                count: 1
            }
        );
    }

    #[test]
    fn test_oversized_template_warns() {
        let mut catalog: TemplateCatalog = full_catalog(3)
            .iter()
            .filter(|t| t.room_type != RoomType::Boss)
            .map(|t| (**t).clone())
            .collect();
        catalog.push(RoomTemplate::walled("huge", RoomType::Boss, 10, 10));

        let mut tree = comb(&row_of(5, 6));
        let warnings = place_rooms(&mut tree, &catalog, &mut DungeonRng::from_u64(3)).unwrap();

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].room_type, RoomType::Boss);
        assert_eq!((warnings[0].width, warnings[0].height), (6, 6));
        assert_eq!(count_of(&tree, RoomType::Boss), 0);
        // the skipped leaf is picked up by the monsters pass
        assert_eq!(count_of(&tree, RoomType::Monsters), 2);
    }

    #[test]
    fn test_largest_unused_first_then_reuse() {
        let catalog: TemplateCatalog = [
            RoomTemplate::walled("small", RoomType::Monsters, 3, 3),
            RoomTemplate::walled("big", RoomType::Monsters, 5, 5),
        ]
        .into_iter()
        .collect();
        let mut tree = comb(&row_of(3, 6));
        let mut warnings = Vec::new();
        fill_by_type(
            &mut tree,
            &catalog,
            RoomType::Monsters,
            Quota::Remaining,
            &mut DungeonRng::from_u64(4),
            &mut warnings,
        )
        .unwrap();

        let mut ids: Vec<_> = tree.rooms().iter().map(|r| r.template.id.clone()).collect();
        ids.sort();
        assert_eq!(ids, vec!["big", "big", "small"]);
    }

    #[test]
    fn test_shared_id_counts_as_used() {
        let catalog: TemplateCatalog = [
            RoomTemplate::walled("", RoomType::Monsters, 3, 3),
            RoomTemplate::walled("", RoomType::Monsters, 5, 5),
        ]
        .into_iter()
        .collect();
        let mut tree = comb(&row_of(3, 6));
        let mut warnings = Vec::new();
        fill_by_type(
            &mut tree,
            &catalog,
            RoomType::Monsters,
            Quota::Remaining,
            &mut DungeonRng::from_u64(4),
            &mut warnings,
        )
        .unwrap();

        assert_eq!(tree.rooms().len(), 3);
        assert!(tree.rooms().iter().all(|r| r.template.width == 5));
    }

    #[test]
    fn test_ranking_ties() {
        let ranked = ranked(vec![
            Arc::new(RoomTemplate::walled("a", RoomType::Heal, 2, 6)),
            Arc::new(RoomTemplate::walled("b", RoomType::Heal, 4, 3)),
            Arc::new(RoomTemplate::walled("c", RoomType::Heal, 3, 4)),
            Arc::new(RoomTemplate::walled("d", RoomType::Heal, 4, 3)),
        ]);
        let ids: Vec<_> = ranked.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_deterministic() {
        let catalog = full_catalog(3);
        let run = |seed| {
            let mut tree = comb(&row_of(8, 6));
            place_rooms(&mut tree, &catalog, &mut DungeonRng::from_u64(seed)).unwrap();
            tree.leaves()
                .iter()
                .map(|c| c.room.as_ref().map(Room::room_type))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(9), run(9));
    }
}
