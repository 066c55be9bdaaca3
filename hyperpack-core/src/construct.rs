use std::collections::BTreeMap;

use crate::entities::{Item, Placement};
use crate::geometry::{OccupancyGrid, PointQueues, SegmentIndex, generate_points};
use crate::strategy::Strategy;

/// The outcome of placing as many items as possible into one container,
/// in one pass, under a fixed sequence and strategy.
#[derive(Debug, Clone)]
pub struct ConstructionResult {
    pub placements: BTreeMap<String, Placement>,
    /// Indices into the original item slice that did not fit.
    pub remaining: Vec<usize>,
    /// placed area / (width * length), or for strip packing, placed
    /// area / (width * occupied height) when `recompute_height` is set.
    pub objective: f64,
    /// Highest y reached by any placed item's top edge.
    pub occupied_height: u32,
}

/// Run one construction pass over `sequence` (indices into `items`)
/// against a container of the given dimensions.
///
/// `sequence` need not cover the whole `items` slice: any index it
/// omits is never attempted and is absent from `remaining`. This lets
/// the multi-container driver hand only the still-unplaced items to
/// each successive container.
pub fn construct_container(
    container_w: u32,
    container_l: u32,
    items: &[Item],
    sequence: &[usize],
    strategy: &Strategy,
    rotation: bool,
) -> ConstructionResult {
    let mut grid = OccupancyGrid::new(container_w, container_l);
    let mut segments = SegmentIndex::new(container_w, container_l);
    let mut queues = PointQueues::new();

    let mut remaining: Vec<usize> = sequence.to_vec();
    let mut placements = BTreeMap::new();
    let mut placed_area: u64 = 0;
    let container_area = container_w as u64 * container_l as u64;

    let mut current_point = queues.take_origin();

    while let Some((px, py)) = current_point {
        if remaining.is_empty() || placed_area >= container_area {
            break;
        }

        let mut placed_at = None;
        for (pos, &item_idx) in remaining.iter().enumerate() {
            let item = &items[item_idx];
            if grid.fits(px, py, item.width, item.length) {
                placed_at = Some((pos, item.width, item.length, false));
                break;
            }
            if rotation
                && item.width != item.length
                && grid.fits(px, py, item.length, item.width)
            {
                placed_at = Some((pos, item.length, item.width, true));
                break;
            }
        }

        if let Some((pos, w, l, rotated)) = placed_at {
            let item_idx = remaining.remove(pos);
            grid.occupy(px, py, w, l);
            placements.insert(
                items[item_idx].id.clone(),
                Placement::new(px, py, w, l, rotated),
            );
            placed_area += w as u64 * l as u64;
            generate_points(
                &mut segments,
                &mut queues,
                container_w,
                container_l,
                px,
                py,
                w,
                l,
            );
        }

        current_point = strategy.next_point(&mut queues);
    }

    let occupied_height = segments.max_horizontal_level();
    let objective = if container_area == 0 {
        0.0
    } else {
        placed_area as f64 / container_area as f64
    };

    ConstructionResult {
        placements,
        remaining,
        objective,
        occupied_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, w: u32, l: u32) -> Item {
        Item::new(id, w, l).unwrap()
    }

    #[test]
    fn trivial_single_item_fit() {
        let items = vec![item("a", 5, 5)];
        let strategy = Strategy::default_order();
        let result = construct_container(10, 10, &items, &[0], &strategy, true);
        assert_eq!(result.placements["a"], Placement::new(0, 0, 5, 5, false));
        assert!((result.objective - 0.25).abs() < 1e-9);
        assert!(result.remaining.is_empty());
    }

    #[test]
    fn rotation_required_to_fit() {
        let items = vec![item("a", 3, 2)];
        let strategy = Strategy::default_order();
        let result = construct_container(2, 3, &items, &[0], &strategy, true);
        assert_eq!(result.placements["a"], Placement::new(0, 0, 2, 3, true));
    }

    #[test]
    fn no_rotation_item_that_does_not_fit_is_left_unplaced() {
        let items = vec![item("a", 3, 2)];
        let strategy = Strategy::default_order();
        let result = construct_container(2, 3, &items, &[0], &strategy, false);
        assert!(result.placements.is_empty());
        assert_eq!(result.remaining, vec![0]);
    }

    #[test]
    fn second_item_lands_on_b_point() {
        let items = vec![item("a", 1, 2), item("b", 1, 3)];
        let strategy = Strategy::new(vec![crate::geometry::PointCategory::B]).unwrap();
        let result = construct_container(5, 5, &items, &[0, 1], &strategy, false);
        assert_eq!(result.placements["a"], Placement::new(0, 0, 1, 2, false));
        assert_eq!(result.placements["b"], Placement::new(1, 0, 1, 3, false));
    }
}
