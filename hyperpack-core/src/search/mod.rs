/// Strategy-level meta-heuristic: enumerate point-selection strategies
/// and retain the best local-search outcome, single- or multi-worker.
pub mod hypersearch;
/// 2-opt hill climbing over the item sequence.
pub mod local_search;
/// Parallel worker dispatch and the shared bulletin board.
pub mod worker;

pub use hypersearch::{HypersearchOptions, hypersearch};
pub use local_search::local_search;
