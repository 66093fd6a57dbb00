//! Binary space partitioning of the map area

use crate::params::GenerationParams;
use crate::rng::DungeonRng;

use super::corridor::synthesize;
use super::rect::Rectangle;
use super::tree::{Container, ContainerId, TreeNode};

/// Split axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    /// Cut along x: children side by side
    Vertical,
    /// Cut along y: children stacked
    Horizontal,
}

/// Recursively partition `area` into a tree of containers.
///
/// Splitting stops when `iterations` reaches zero (a negative budget never
/// does), when either side of the area is no larger than twice
/// `container_minimum_size`, or when no split satisfying the ratio was found
/// within `container_split_retries` attempts. Every internal node gets the
/// corridor joining its two children.
pub fn build_tree(
    area: Rectangle,
    iterations: i32,
    params: &GenerationParams,
    rng: &mut DungeonRng,
) -> TreeNode {
    let mut next_id = 0;
    split_node(area, iterations, params, rng, &mut next_id)
}

fn split_node(
    area: Rectangle,
    iterations: i32,
    params: &GenerationParams,
    rng: &mut DungeonRng,
    next_id: &mut u32,
) -> TreeNode {
    let mut leaf = Container::new(ContainerId(*next_id), area);
    *next_id += 1;

    let min = i64::from(params.container_minimum_size) * 2;
    if iterations == 0 || i64::from(area.width) <= min || i64::from(area.height) <= min {
        return TreeNode::new(leaf);
    }

    let Some((left_area, right_area)) = random_split(area, params, rng) else {
        return TreeNode::new(leaf);
    };

    let left = split_node(left_area, iterations.saturating_sub(1), params, rng, next_id);
    let right = split_node(right_area, iterations.saturating_sub(1), params, rng, next_id);
    leaf.corridor = Some(synthesize(&left.leaf, &right.leaf, params.corridor_width));

    TreeNode::with_children(leaf, left, right)
}

/// Draw splits until one passes the ratio check or the retry budget runs out.
fn random_split(
    area: Rectangle,
    params: &GenerationParams,
    rng: &mut DungeonRng,
) -> Option<(Rectangle, Rectangle)> {
    for _ in 0..params.container_split_retries {
        let axis = if rng.coin() { Axis::Vertical } else { Axis::Horizontal };
        let (first, second) = match axis {
            Axis::Vertical => {
                let offset = rng.range(1, area.width);
                (
                    Rectangle::new(area.x, area.y, offset, area.height),
                    Rectangle::new(area.x + offset, area.y, area.width - offset, area.height),
                )
            }
            Axis::Horizontal => {
                let offset = rng.range(1, area.height);
                (
                    Rectangle::new(area.x, area.y, area.width, offset),
                    Rectangle::new(area.x, area.y + offset, area.width, area.height - offset),
                )
            }
        };

        if ratio(&first, axis) >= params.container_minimum_ratio
            && ratio(&second, axis) >= params.container_minimum_ratio
        {
            return Some((first, second));
        }
    }
    None
}

/// Width over height for a vertical cut, height over width for a horizontal one
fn ratio(rect: &Rectangle, axis: Axis) -> f64 {
    let (num, den) = match axis {
        Axis::Vertical => (rect.width, rect.height),
        Axis::Horizontal => (rect.height, rect.width),
    };
    f64::from(num) / f64::from(den)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(min: i32, ratio: f64, retries: u32) -> GenerationParams {
        GenerationParams {
            container_minimum_size: min,
            container_minimum_ratio: ratio,
            container_split_retries: retries,
            corridor_width: 2,
            ..Default::default()
        }
    }

    fn assert_tiles(tree: &TreeNode, area: Rectangle) {
        let leaves = tree.leaves();
        let total: i32 = leaves.iter().map(|c| c.rect.area()).sum();
        assert_eq!(total, area.area());
        for (i, a) in leaves.iter().enumerate() {
            assert!(area.contains_rect(&a.rect));
            for b in &leaves[i + 1..] {
                assert!(!a.rect.intersects(&b.rect), "{:?} overlaps {:?}", a.rect, b.rect);
            }
        }
    }

    #[test]
    fn test_huge_minimum_size_keeps_a_leaf() {
        let mut rng = DungeonRng::from_u64(1);
        let area = Rectangle::new(0, 0, 40, 40);
        let tree = build_tree(area, 9, &params(1_500_000_000, 0.45, 30), &mut rng);
        assert!(tree.is_leaf());
        assert_eq!(tree.leaf.rect, area);
    }

    #[test]
    fn test_zero_iterations_is_leaf() {
        let mut rng = DungeonRng::from_u64(1);
        let area = Rectangle::new(0, 0, 40, 40);
        let tree = build_tree(area, 0, &params(2, 0.45, 30), &mut rng);
        assert!(tree.is_leaf());
        assert_eq!(tree.leaf.rect, area);
        assert!(tree.leaf.corridor.is_none());
    }

    #[test]
    fn test_too_small_is_leaf() {
        let mut rng = DungeonRng::from_u64(1);
        let tree = build_tree(Rectangle::new(0, 0, 8, 20), 5, &params(4, 0.0, 30), &mut rng);
        assert!(tree.is_leaf());
    }

    #[test]
    fn test_impossible_ratio_stays_leaf() {
        let mut rng = DungeonRng::from_u64(3);
        let tree = build_tree(Rectangle::new(0, 0, 30, 30), 4, &params(2, 100.0, 30), &mut rng);
        assert!(tree.is_leaf());
    }

    #[test]
    fn test_leaves_partition_area() {
        for seed in 0..20 {
            let mut rng = DungeonRng::from_u64(seed);
            let area = Rectangle::new(2, 2, 36, 21);
            let tree = build_tree(area, 9, &params(4, 0.45, 30), &mut rng);
            assert_tiles(&tree, area);
        }
    }

    #[test]
    fn test_internal_nodes_have_corridors() {
        let mut rng = DungeonRng::from_u64(11);
        let tree = build_tree(Rectangle::new(0, 0, 60, 60), 4, &params(3, 0.45, 30), &mut rng);
        tree.walk(&mut |node| {
            assert_eq!(node.is_leaf(), node.leaf.corridor.is_none());
        });
        assert!(tree.depth() <= 4);
    }

    #[test]
    fn test_ids_are_unique_and_sequential() {
        let mut rng = DungeonRng::from_u64(5);
        let tree = build_tree(Rectangle::new(0, 0, 60, 60), -1, &params(4, 0.45, 30), &mut rng);
        let mut ids = Vec::new();
        tree.walk(&mut |node| ids.push(node.leaf.id.0));
        let expected: Vec<u32> = (0..ids.len() as u32).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_forced_even_split() {
        // On a 10x10 area with ratio 0.45 only the 5/5 cut passes (4/10 = 0.4)
        let mut rng = DungeonRng::from_u64(9);
        let tree = build_tree(Rectangle::new(0, 0, 10, 10), 1, &params(2, 0.45, 1000), &mut rng);
        assert_eq!(tree.leaves().len(), 2);
        for leaf in tree.leaves() {
            let size = (leaf.rect.width, leaf.rect.height);
            assert!(size == (5, 10) || size == (10, 5), "unexpected {size:?}");
        }
    }
}
