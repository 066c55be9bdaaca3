use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Solve a rectangle bin-packing or strip-packing instance.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the JSON problem instance.
    #[arg(long)]
    pub input: PathBuf,

    /// Path to write the JSON solution to.
    #[arg(long)]
    pub output: PathBuf,

    /// Which operation to run.
    #[arg(long, value_enum, default_value = "hypersearch")]
    pub operation: Operation,

    /// Override the instance's (or default) time budget, in seconds.
    #[arg(long)]
    pub max_time: Option<u64>,

    /// Override the instance's (or default) worker count.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Disable rotation, overriding the instance's setting.
    #[arg(long)]
    pub no_rotation: bool,

    /// Enumerate all 720 strategies instead of the small default pool.
    #[arg(long)]
    pub exhaustive: bool,

    /// Skip the throttle cap on local-search neighbours per node.
    #[arg(long)]
    pub no_throttle: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Solve,
    LocalSearch,
    Hypersearch,
}
