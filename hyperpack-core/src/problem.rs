use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use log::debug;

use crate::construct::construct_container;
use crate::entities::{Container, Item, Solution, container::STRIP_PACK_CONTAINER_ID};
use crate::strategy::Strategy;

/// Whether a [`Problem`] is packing into a fixed set of containers, or
/// packing everything into one container of bounded width and
/// minimising its occupied height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    BinPacking,
    StripPacking,
}

/// Key used by [`Problem::sort_items`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Area,
    Perimeter,
    LongestSideRatio,
}

/// Orientation normalisation applied by [`Problem::orient_items`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// width >= length
    Wide,
    /// width <= length
    Long,
    None,
}

/// Solver-wide knobs, independent of the problem's geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub max_time_in_seconds: u64,
    pub workers_num: usize,
    pub rotation: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_time_in_seconds: 60,
            workers_num: 1,
            rotation: true,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.max_time_in_seconds == 0 {
            bail!("max_time_in_seconds must be a positive integer");
        }
        if self.workers_num == 0 {
            bail!("workers_num must be a positive integer");
        }
        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        if self.workers_num > available {
            log::warn!(
                "workers_num ({}) exceeds available parallelism ({available}); proceeding anyway",
                self.workers_num
            );
        }
        Ok(())
    }
}

/// A packing problem: containers (or a strip width), items, solver
/// settings, and the mutable search state (current sequence, strategy,
/// last solution) that the construct/search layers operate on.
#[derive(Debug, Clone)]
pub struct Problem {
    pub(crate) mode: Mode,
    pub(crate) containers: Vec<Container>,
    pub(crate) items: Vec<Item>,
    pub(crate) sequence: Vec<usize>,
    pub(crate) settings: Settings,
    pub(crate) strategy: Strategy,
    pub(crate) container_height: Option<u32>,
    pub(crate) container_min_height: Option<u32>,
    pub(crate) solution: Solution,
    pub(crate) obj_val_per_container: BTreeMap<String, f64>,
    pub(crate) heights_history: Vec<u32>,
}

impl Problem {
    pub fn new_bin_packing(
        containers: Vec<Container>,
        items: Vec<Item>,
        settings: Settings,
    ) -> Result<Self> {
        if containers.is_empty() {
            bail!("bin packing requires at least one container");
        }
        if items.is_empty() {
            bail!("at least one item is required");
        }
        settings.validate()?;
        let sequence = (0..items.len()).collect();
        Ok(Self {
            mode: Mode::BinPacking,
            containers,
            items,
            sequence,
            settings,
            strategy: Strategy::default_order(),
            container_height: None,
            container_min_height: None,
            solution: Solution::new(),
            obj_val_per_container: BTreeMap::new(),
            heights_history: Vec::new(),
        })
    }

    pub fn new_strip_packing(
        items: Vec<Item>,
        strip_pack_width: u32,
        settings: Settings,
    ) -> Result<Self> {
        if strip_pack_width == 0 {
            bail!("strip_pack_width must be a positive integer");
        }
        if items.is_empty() {
            bail!("at least one item is required");
        }
        settings.validate()?;
        let initial_height: u32 = items.iter().map(|i| i.length.max(i.width)).sum();
        let container =
            Container::new(STRIP_PACK_CONTAINER_ID, strip_pack_width, initial_height)
                .context("failed to build the strip-pack container")?;
        let sequence = (0..items.len()).collect();
        Ok(Self {
            mode: Mode::StripPacking,
            containers: vec![container],
            items,
            sequence,
            settings,
            strategy: Strategy::default_order(),
            container_height: Some(initial_height),
            container_min_height: None,
            solution: Solution::new(),
            obj_val_per_container: BTreeMap::new(),
            heights_history: Vec::new(),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Replace the solver-wide settings wholesale; does not reset the
    /// solution, since a settings change alone does not invalidate an
    /// already-computed placement.
    pub fn set_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn set_potential_points_strategy(&mut self, strategy: Strategy) -> Result<()> {
        self.strategy = strategy;
        Ok(())
    }

    pub fn set_container_height(&mut self, value: u32) -> Result<()> {
        if self.mode != Mode::StripPacking {
            bail!("container height can only be set in strip-packing mode");
        }
        if value == 0 {
            bail!("container height must be a positive integer");
        }
        if let Some(min_h) = self.container_min_height {
            if value < min_h {
                bail!("container height must be >= container_min_height");
            }
        }
        self.container_height = Some(value);
        self.containers[0].length = value;
        self.invalidate_solution();
        Ok(())
    }

    pub fn set_container_min_height(&mut self, value: u32) -> Result<()> {
        if self.mode != Mode::StripPacking {
            bail!("container_min_height can only be set in strip-packing mode");
        }
        if value == 0 {
            bail!("container_min_height must be a positive integer");
        }
        if let Some(h) = self.container_height {
            if value > h {
                bail!("container_min_height must be <= the current container height");
            }
        }
        self.container_min_height = Some(value);
        Ok(())
    }

    pub fn container_min_height(&self) -> Option<u32> {
        self.container_min_height
    }

    fn invalidate_solution(&mut self) {
        self.solution = Solution::new();
        self.obj_val_per_container.clear();
    }

    /// area / perimeter / longest-side-ratio sort, idempotent when
    /// applied twice with the same arguments.
    pub fn sort_items(&mut self, by: SortKey, reverse: bool) {
        let key = |idx: &usize| {
            let item = &self.items[*idx];
            match by {
                SortKey::Area => item.area() as f64,
                SortKey::Perimeter => item.perimeter() as f64,
                SortKey::LongestSideRatio => item.longest_side_ratio(),
            }
        };
        self.sequence.sort_by(|a, b| {
            let (ka, kb) = (key(a), key(b));
            if reverse {
                kb.partial_cmp(&ka).unwrap_or(std::cmp::Ordering::Equal)
            } else {
                ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
            }
        });
    }

    pub fn orient_items(&mut self, orientation: Orientation) {
        if !self.settings.rotation || orientation == Orientation::None {
            return;
        }
        for item in &mut self.items {
            match orientation {
                Orientation::Wide => item.orient_wide(),
                Orientation::Long => item.orient_long(),
                Orientation::None => {}
            }
        }
    }

    /// Run the construction pipeline across all containers in the
    /// declared order, using `sequence` if given, else the current one.
    pub fn solve(&mut self, sequence: Option<Vec<usize>>) -> Result<()> {
        let sequence = sequence.unwrap_or_else(|| self.sequence.clone());
        let (solution, obj_per_container) = self.run_construction(&sequence);
        self.sequence = sequence;
        self.solution = solution;
        self.obj_val_per_container = obj_per_container;
        Ok(())
    }

    /// Runs construction without mutating `self`; used by local search
    /// to evaluate neighbours before committing.
    pub(crate) fn run_construction(
        &self,
        sequence: &[usize],
    ) -> (Solution, BTreeMap<String, f64>) {
        let mut solution = Solution::new();
        let mut obj_per_container = BTreeMap::new();
        let mut remaining: Vec<usize> = sequence.to_vec();

        for container in &self.containers {
            if remaining.is_empty() {
                break;
            }
            let container_l = if self.mode == Mode::StripPacking {
                self.container_height.unwrap_or(container.length)
            } else {
                container.length
            };
            let result = construct_container(
                container.width,
                container_l,
                &self.items,
                &remaining,
                &self.strategy,
                self.settings.rotation,
            );
            debug!(
                "container {}: placed {} items, objective {:.4}",
                container.id,
                result.placements.len(),
                result.objective
            );

            let objective = if self.mode == Mode::StripPacking && result.occupied_height > 0 {
                let area: u64 = result
                    .placements
                    .values()
                    .map(|p| p.width as u64 * p.length as u64)
                    .sum();
                area as f64 / (container.width as u64 * result.occupied_height as u64) as f64
            } else {
                result.objective
            };

            obj_per_container.insert(container.id.clone(), objective);
            solution
                .containers
                .insert(container.id.clone(), result.placements);
            remaining = result.remaining;
        }

        (solution, obj_per_container)
    }

    /// Aggregate objective: sum of all but the last container's
    /// objective, plus 0.7 times the last. A single container is simply
    /// its own objective.
    pub fn calculate_obj_value(&self) -> f64 {
        calculate_aggregate_obj_value(&self.containers, &self.obj_val_per_container)
    }

    pub fn obj_val_per_container(&self) -> &BTreeMap<String, f64> {
        &self.obj_val_per_container
    }

    pub fn heights_history(&self) -> &[u32] {
        &self.heights_history
    }

    /// Hill-climb the current item sequence via 2-opt swaps.
    pub fn local_search(&mut self, throttle: bool) -> Result<()> {
        crate::search::local_search(self, throttle, std::time::Instant::now())
    }

    /// Enumerate point-selection strategies and retain the best.
    pub fn hypersearch(&mut self, opts: crate::search::HypersearchOptions) -> Result<()> {
        crate::search::hypersearch(self, opts)
    }
}

/// Preserved as-is from the reference solver: biases the aggregate
/// score towards filling earlier containers first.
pub(crate) fn calculate_aggregate_obj_value(
    containers: &[Container],
    obj_val_per_container: &BTreeMap<String, f64>,
) -> f64 {
    if containers.len() <= 1 {
        return containers
            .first()
            .and_then(|c| obj_val_per_container.get(&c.id))
            .copied()
            .unwrap_or(0.0);
    }
    let (last, rest) = containers.split_last().expect("checked non-empty above");
    let rest_sum: f64 = rest
        .iter()
        .filter_map(|c| obj_val_per_container.get(&c.id))
        .sum();
    let last_val = obj_val_per_container.get(&last.id).copied().unwrap_or(0.0);
    rest_sum + 0.7 * last_val
}
