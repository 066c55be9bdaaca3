/// Dense per-container occupancy grid and the fit test.
pub mod occupancy;
/// Candidate placement point generation and the ten point categories.
pub mod points;
/// Horizontal/vertical edge segment bookkeeping used by point generation.
pub mod segments;

pub use occupancy::OccupancyGrid;
pub use points::{PointCategory, PointQueues, generate_points};
pub use segments::SegmentIndex;
