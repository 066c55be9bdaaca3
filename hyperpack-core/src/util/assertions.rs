//! Debug-only invariant checks, meant to be wrapped in `debug_assert!` at
//! call sites rather than called unconditionally.

use crate::entities::{Container, Solution};

/// Every placement lies within its container's bounds and no two
/// placements in the same container overlap.
pub fn solution_is_valid(solution: &Solution, containers: &[Container]) -> bool {
    for container in containers {
        let Some(placements) = solution.container(&container.id) else {
            continue;
        };
        let items: Vec<_> = placements.values().collect();
        for p in &items {
            if p.x_end() > container.width || p.y_end() > container.length {
                return false;
            }
        }
        for i in 0..items.len() {
            for j in i + 1..items.len() {
                if rects_overlap(items[i], items[j]) {
                    return false;
                }
            }
        }
    }
    true
}

fn rects_overlap(a: &crate::entities::Placement, b: &crate::entities::Placement) -> bool {
    a.x < b.x_end() && b.x < a.x_end() && a.y < b.y_end() && b.y < a.y_end()
}

/// Every id in `solution` appears at most once across all containers.
pub fn no_item_placed_twice(solution: &Solution) -> bool {
    let mut seen = std::collections::HashSet::new();
    solution.placed_item_ids().all(|id| seen.insert(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Placement;

    #[test]
    fn detects_overlap() {
        let a = Placement::new(0, 0, 4, 4, false);
        let b = Placement::new(2, 2, 4, 4, false);
        assert!(rects_overlap(&a, &b));
        let c = Placement::new(4, 0, 4, 4, false);
        assert!(!rects_overlap(&a, &c));
    }
}
