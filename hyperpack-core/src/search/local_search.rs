use std::time::{Duration, Instant};

use anyhow::Result;

use crate::entities::Solution;
use crate::problem::{Mode, Problem, calculate_aggregate_obj_value};

/// Neighbour cap applied when `throttle` is set, matching the reference
/// solver's constant.
pub const MAX_NEIGHBORS_THROTTLE: usize = 2500;

/// 2-opt hill climbing over the item sequence. First-improvement
/// acceptance; every accepted improvement restarts neighbour
/// enumeration from swap `(0, 1)` rather than resuming where it left
/// off. This is intentional and documented, not a bug: see the design
/// notes on neighbourhood re-enumeration.
pub fn local_search(problem: &mut Problem, throttle: bool, start: Instant) -> Result<()> {
    let max_time = Duration::from_secs(problem.settings().max_time_in_seconds);

    problem.solve(None)?;
    let mut incumbent_seq = problem.sequence().to_vec();
    let mut incumbent_solution = problem.solution().clone();
    let mut incumbent_obj_per = problem.obj_val_per_container().clone();
    let mut best_obj =
        calculate_aggregate_obj_value(problem.containers(), &incumbent_obj_per);

    let optimum = f64::INFINITY;
    let n = incumbent_seq.len();
    let mut swaps = Vec::with_capacity(n.saturating_sub(1) * n / 2);
    for i in 0..n {
        for j in i + 1..n {
            swaps.push((i, j));
        }
    }
    let max_neighbors = if throttle {
        swaps.len().min(MAX_NEIGHBORS_THROTTLE)
    } else {
        swaps.len()
    };

    loop {
        let mut neighbor_found = false;
        let mut out_of_time = false;
        let mut global_optima = false;
        let mut processed = 0usize;

        for &(i, j) in &swaps {
            let mut candidate_seq = incumbent_seq.clone();
            candidate_seq.swap(i, j);
            let (solution, obj_per) = problem.run_construction(&candidate_seq);
            let candidate_obj = calculate_aggregate_obj_value(problem.containers(), &obj_per);
            processed += 1;

            let accept = if problem.mode() == Mode::StripPacking
                && problem.container_min_height().is_none()
            {
                candidate_obj > best_obj && solution.total_placed() == problem.items().len()
            } else {
                candidate_obj > best_obj
            };

            if accept {
                incumbent_seq = candidate_seq;
                best_obj = candidate_obj;

                if problem.mode() == Mode::StripPacking {
                    let new_height = solution_height(&solution);
                    if new_height > 0 {
                        problem.container_height = Some(new_height);
                        problem.containers[0].length = new_height;
                    }
                    problem.heights_history.push(new_height);
                }

                incumbent_solution = solution;
                incumbent_obj_per = obj_per;

                neighbor_found = true;
                global_optima = best_obj >= optimum;
            }

            out_of_time = start.elapsed() >= max_time;
            let hit_cap = processed >= max_neighbors;
            if out_of_time || neighbor_found || global_optima || hit_cap {
                break;
            }
        }

        log::debug!(
            "local search node: best_obj={best_obj:.4} processed={processed} neighbor_found={neighbor_found}"
        );

        if !(neighbor_found && !out_of_time && !global_optima) {
            break;
        }
    }

    problem.sequence = incumbent_seq;
    problem.solution = incumbent_solution;
    problem.obj_val_per_container = incumbent_obj_per;
    Ok(())
}

fn solution_height(solution: &Solution) -> u32 {
    solution
        .containers
        .values()
        .flat_map(|items| items.values())
        .map(|p| p.y_end())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Container, Item};
    use crate::problem::Settings;

    #[test]
    fn local_search_never_decreases_objective() {
        let containers = vec![Container::new("c1", 4, 4).unwrap()];
        let items = vec![
            Item::new("a", 3, 1).unwrap(),
            Item::new("b", 1, 3).unwrap(),
            Item::new("c", 2, 2).unwrap(),
        ];
        let mut problem =
            Problem::new_bin_packing(containers, items, Settings::default()).unwrap();
        problem.solve(None).unwrap();
        let initial_obj = problem.calculate_obj_value();

        local_search(&mut problem, true, Instant::now()).unwrap();
        let final_obj = problem.calculate_obj_value();
        assert!(final_obj >= initial_obj);
    }

    #[test]
    fn throttle_caps_neighbors_processed_on_unplaceable_items() {
        let containers = vec![Container::new("c1", 1, 1).unwrap()];
        let items: Vec<Item> = (0..73)
            .map(|i| Item::new(format!("item-{i}"), 2, 2).unwrap())
            .collect();
        let mut problem =
            Problem::new_bin_packing(containers, items, Settings::default()).unwrap();
        local_search(&mut problem, true, Instant::now()).unwrap();
        assert!(problem.solution().total_placed() == 0);
    }
}
