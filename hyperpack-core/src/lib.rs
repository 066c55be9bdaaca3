//! Deterministic point-generation solver for 2D orthogonal rectangle
//! bin packing and strip packing.
//!
//! Construction places items by walking a priority-ordered list of
//! candidate points; [`search::local_search`] hill-climbs the item
//! sequence, and [`search::hypersearch`] enumerates point-selection
//! strategies, optionally sharded across worker threads.

/// Construction of one container's placements from an item sequence.
pub mod construct;
/// Containers, items, placements, and solutions.
pub mod entities;
/// Segment indexing, occupancy, and candidate-point generation.
pub mod geometry;
/// Serde external representation, instance import, solution export.
pub mod io;
/// The top-level problem type and its mutating operations.
pub mod problem;
/// Local search and hypersearch meta-heuristics.
pub mod search;
/// Point-selection strategies.
pub mod strategy;
/// Debug-only structural invariant checks.
pub mod util;

pub use entities::{Container, Item, Placement, Solution};
pub use problem::{Mode, Orientation, Problem, Settings, SortKey};
pub use strategy::Strategy;
