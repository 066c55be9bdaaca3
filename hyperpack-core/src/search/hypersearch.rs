use std::time::{Duration, Instant};

use anyhow::Result;

use crate::problem::{Mode, Orientation, Problem, SortKey};
use crate::strategy::Strategy;

use super::local_search::local_search;
use super::worker::run_hypersearch_workers;

/// Parameters for [`hypersearch`].
#[derive(Debug, Clone)]
pub struct HypersearchOptions {
    pub orientation: Orientation,
    pub sorting_by: Option<(SortKey, bool)>,
    pub throttle: bool,
    pub exhaustive: bool,
}

impl Default for HypersearchOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::None,
            sorting_by: None,
            throttle: true,
            exhaustive: true,
        }
    }
}

/// Prepare items (sort, orient), enumerate point-selection strategies,
/// and drive local search once per strategy -- sequentially, or sharded
/// across [`crate::problem::Settings::workers_num`] workers -- retaining
/// the best result found.
pub fn hypersearch(problem: &mut Problem, opts: HypersearchOptions) -> Result<()> {
    if let Some((key, reverse)) = opts.sorting_by {
        problem.sort_items(key, reverse);
    }
    problem.orient_items(opts.orientation);

    let start = Instant::now();
    let max_time = Duration::from_secs(problem.settings().max_time_in_seconds);
    let strip_pack = problem.mode() == Mode::StripPacking;
    let base_sequence = problem.sequence().to_vec();

    let strategies = if opts.exhaustive {
        Strategy::exhaustive(strip_pack)
    } else {
        Strategy::pool(strip_pack)
    };

    problem.set_potential_points_strategy(Strategy::default_order())?;
    problem.sequence = base_sequence.clone();
    local_search(problem, opts.throttle, start)?;

    let mut best_objective = problem.calculate_obj_value();
    let mut best_strategy = problem.strategy().clone();
    let mut best_sequence = problem.sequence().to_vec();
    let mut best_solution = problem.solution().clone();
    let mut best_obj_per = problem.obj_val_per_container().clone();

    if problem.settings().workers_num <= 1 {
        for strategy in strategies {
            if start.elapsed() >= max_time {
                log::info!("hypersearch: time budget exhausted, stopping strategy enumeration");
                break;
            }
            problem.set_potential_points_strategy(strategy.clone())?;
            problem.sequence = base_sequence.clone();
            local_search(problem, opts.throttle, start)?;
            let objective = problem.calculate_obj_value();
            if objective > best_objective {
                best_objective = objective;
                best_strategy = strategy;
                best_sequence = problem.sequence().to_vec();
                best_solution = problem.solution().clone();
                best_obj_per = problem.obj_val_per_container().clone();
            }
            if best_objective >= f64::INFINITY {
                break;
            }
        }
    } else {
        let outcome = run_hypersearch_workers(
            problem,
            &strategies,
            &base_sequence,
            opts.throttle,
            start,
        )?;
        if outcome.objective > best_objective {
            best_objective = outcome.objective;
            best_strategy = outcome.strategy;
            best_sequence = outcome.sequence;
            best_solution = outcome.solution;
            best_obj_per = outcome.obj_val_per_container;
        }
    }

    problem.set_potential_points_strategy(best_strategy)?;
    problem.sequence = best_sequence;
    problem.solution = best_solution;
    problem.obj_val_per_container = best_obj_per;
    log::info!("hypersearch finished with objective {best_objective:.4}");
    Ok(())
}
