use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};

use crate::entities::Solution;
use crate::problem::Problem;
use crate::strategy::Strategy;

use super::local_search::local_search;

/// What one hypersearch worker hands back after exhausting its shard of
/// strategies, hitting the time budget, or reaching the global optimum.
#[derive(Debug, Clone)]
pub struct WorkerOutcome {
    pub objective: f64,
    pub solution: Solution,
    pub obj_val_per_container: BTreeMap<String, f64>,
    pub sequence: Vec<usize>,
    pub strategy: Strategy,
}

/// Split `strategies` into `workers_num` contiguous shards (ceil
/// division), matching the reference solver's chunking.
fn shard(strategies: &[Strategy], workers_num: usize) -> Vec<Vec<Strategy>> {
    let chunk_size = strategies.len().div_ceil(workers_num).max(1);
    strategies
        .chunks(chunk_size)
        .map(<[Strategy]>::to_vec)
        .collect()
}

/// Dispatch one rayon-scoped task per worker, each running its own
/// sequential local-search pipeline over an independent shard of
/// strategies against a private clone of `problem`.
///
/// Coordination is a shared bulletin board (atomic f64 bit patterns,
/// one slot per worker) workers use to early-exit once a peer reaches
/// the global optimum, plus one result channel per worker. After all
/// workers join, the slot holding the maximum objective decides the
/// winner; a worker that errored writes `-1.0` to its slot.
pub fn run_hypersearch_workers(
    problem: &Problem,
    strategies: &[Strategy],
    base_sequence: &[usize],
    throttle: bool,
    start: Instant,
) -> Result<WorkerOutcome> {
    let workers_num = problem.settings().workers_num;
    let shards = shard(strategies, workers_num);
    let bulletin: Vec<AtomicU64> = (0..shards.len())
        .map(|_| AtomicU64::new(0f64.to_bits()))
        .collect();

    let channels: Vec<(mpsc::Sender<Result<WorkerOutcome, String>>, mpsc::Receiver<_>)> =
        (0..shards.len()).map(|_| mpsc::channel()).collect();

    rayon::scope(|scope| {
        for (idx, (shard_strategies, (tx, _))) in shards.iter().zip(channels.iter()).enumerate() {
            let mut worker_problem = problem.clone();
            let tx = tx.clone();
            let bulletin = &bulletin;
            let base_sequence = base_sequence.to_vec();
            let shard_strategies = shard_strategies.clone();
            scope.spawn(move |_| {
                let outcome = run_one_worker(
                    &mut worker_problem,
                    &shard_strategies,
                    &base_sequence,
                    throttle,
                    start,
                    idx,
                    bulletin,
                );
                let result = match outcome {
                    Ok(outcome) => {
                        bulletin[idx].store(outcome.objective.to_bits(), Ordering::SeqCst);
                        Ok(outcome)
                    }
                    Err(err) => {
                        bulletin[idx].store((-1.0f64).to_bits(), Ordering::SeqCst);
                        Err(err.to_string())
                    }
                };
                let _ = tx.send(result);
            });
        }
    });

    let mut results: Vec<Option<WorkerOutcome>> = Vec::with_capacity(channels.len());
    let mut failures = 0usize;
    for (_, rx) in channels {
        match rx.recv() {
            Ok(Ok(outcome)) => results.push(Some(outcome)),
            Ok(Err(msg)) => {
                log::error!("hypersearch worker failed: {msg}");
                failures += 1;
                results.push(None);
            }
            Err(_) => {
                failures += 1;
                results.push(None);
            }
        }
    }

    if failures == results.len() {
        bail!("all hypersearch workers failed");
    }
    if failures > 0 {
        log::error!(
            "{failures} of {} hypersearch workers failed; continuing with surviving results",
            results.len()
        );
    }

    let winner = bulletin
        .iter()
        .map(|slot| f64::from_bits(slot.load(Ordering::SeqCst)))
        .enumerate()
        .filter(|(idx, _)| results[*idx].is_some())
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(idx, _)| idx)
        .expect("at least one worker succeeded");

    Ok(results[winner].take().expect("winner slot checked Some"))
}

#[allow(clippy::too_many_arguments)]
fn run_one_worker(
    problem: &mut Problem,
    strategies: &[Strategy],
    base_sequence: &[usize],
    throttle: bool,
    start: Instant,
    worker_idx: usize,
    bulletin: &[AtomicU64],
) -> Result<WorkerOutcome> {
    let max_time = Duration::from_secs(problem.settings().max_time_in_seconds);
    let optimum = f64::INFINITY;

    let mut best_objective = f64::NEG_INFINITY;
    let mut best: Option<(Solution, BTreeMap<String, f64>, Vec<usize>, Strategy)> = None;

    for strategy in strategies {
        if start.elapsed() >= max_time {
            break;
        }
        problem.set_potential_points_strategy(strategy.clone())?;
        problem.sequence = base_sequence.to_vec();
        local_search(problem, throttle, start)?;
        let objective = problem.calculate_obj_value();

        if objective > best_objective {
            best_objective = objective;
            best = Some((
                problem.solution().clone(),
                problem.obj_val_per_container().clone(),
                problem.sequence().to_vec(),
                strategy.clone(),
            ));
            bulletin[worker_idx].store(best_objective.to_bits(), Ordering::SeqCst);
        }

        if best_objective >= optimum {
            break;
        }
        let peer_max = bulletin
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != worker_idx)
            .map(|(_, slot)| f64::from_bits(slot.load(Ordering::SeqCst)))
            .fold(f64::NEG_INFINITY, f64::max);
        if peer_max >= optimum {
            break;
        }
    }

    let (solution, obj_val_per_container, sequence, strategy) =
        best.ok_or_else(|| anyhow::anyhow!("worker shard produced no strategies to try"))?;

    Ok(WorkerOutcome {
        objective: best_objective,
        solution,
        obj_val_per_container,
        sequence,
        strategy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Container, Item};
    use crate::problem::Settings;

    #[test]
    fn shards_strategies_into_roughly_even_chunks() {
        let strategies = Strategy::exhaustive(false);
        let shards = shard(&strategies, 4);
        assert_eq!(shards.len(), 4);
        let total: usize = shards.iter().map(Vec::len).sum();
        assert_eq!(total, 720);
    }

    #[test]
    fn multi_worker_matches_or_beats_single_worker() {
        let containers = vec![Container::new("c1", 6, 6).unwrap()];
        let items = vec![
            Item::new("a", 3, 2).unwrap(),
            Item::new("b", 2, 3).unwrap(),
            Item::new("c", 4, 4).unwrap(),
        ];
        let settings = Settings {
            workers_num: 2,
            ..Settings::default()
        };
        let problem = Problem::new_bin_packing(containers, items, settings).unwrap();
        let strategies = Strategy::pool(false);
        let outcome = run_hypersearch_workers(
            &problem,
            &strategies,
            problem.sequence(),
            true,
            Instant::now(),
        )
        .unwrap();
        assert!(outcome.objective >= 0.0);
    }
}
