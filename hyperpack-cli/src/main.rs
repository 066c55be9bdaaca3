mod cli;
mod logging;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use thousands::Separable;

use hyperpack_core::io::{
    ExtBinPackingInstance, ExtSolution, ExtStripPackingInstance, export_solution,
    import_bin_packing, import_strip_packing,
};
use hyperpack_core::search::HypersearchOptions;
use hyperpack_core::{Orientation, Problem, Settings};

use cli::{Cli, Operation};

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init_logger()?;

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read instance file {:?}", args.input))?;
    let json: serde_json::Value =
        serde_json::from_str(&raw).context("instance file is not valid JSON")?;

    let mut problem = if json.get("strip_pack_width").is_some() {
        let instance: ExtStripPackingInstance =
            serde_json::from_value(json).context("failed to parse strip packing instance")?;
        import_strip_packing(instance)?
    } else {
        let instance: ExtBinPackingInstance =
            serde_json::from_value(json).context("failed to parse bin packing instance")?;
        import_bin_packing(instance)?
    };

    apply_cli_overrides(&mut problem, &args)?;

    match args.operation {
        Operation::Solve => problem.solve(None)?,
        Operation::LocalSearch => problem.local_search(!args.no_throttle)?,
        Operation::Hypersearch => problem.hypersearch(HypersearchOptions {
            orientation: Orientation::None,
            sorting_by: None,
            throttle: !args.no_throttle,
            exhaustive: args.exhaustive,
        })?,
    }

    let total_placed: usize = problem.solution().total_placed();
    let total_items = problem.items().len();
    log::info!(
        "placed {} / {} items, objective {:.4}",
        total_placed.separate_with_commas(),
        total_items.separate_with_commas(),
        problem.calculate_obj_value()
    );

    let solution: ExtSolution = export_solution(problem.solution());
    let output = serde_json::to_string_pretty(&solution).context("failed to serialize solution")?;
    fs::write(&args.output, output)
        .with_context(|| format!("failed to write solution file {:?}", args.output))?;

    Ok(())
}

fn apply_cli_overrides(problem: &mut Problem, args: &Cli) -> Result<()> {
    if args.max_time.is_none() && args.workers.is_none() && !args.no_rotation {
        return Ok(());
    }
    let current = *problem.settings();
    let overridden = Settings {
        max_time_in_seconds: args.max_time.unwrap_or(current.max_time_in_seconds),
        workers_num: args.workers.unwrap_or(current.workers_num),
        rotation: if args.no_rotation { false } else { current.rotation },
    };
    problem.set_settings(overridden)
}
