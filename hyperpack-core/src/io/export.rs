use crate::entities::Solution;

use super::ext_repr::ExtSolution;

/// Convert a solved [`crate::problem::Problem`]'s solution into its
/// external (JSON-serializable) representation.
pub fn export_solution(solution: &Solution) -> ExtSolution {
    solution
        .containers
        .iter()
        .map(|(container_id, placements)| {
            let items = placements
                .iter()
                .map(|(item_id, p)| (item_id.clone(), p.as_tuple()))
                .collect();
            (container_id.clone(), items)
        })
        .collect()
}
