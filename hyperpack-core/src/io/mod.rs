/// Solution serialization to the external representation.
pub mod export;
/// Serde types mirroring the JSON instance/solution file formats.
pub mod ext_repr;
/// Building a [`crate::problem::Problem`] from the external representation.
pub mod import;

pub use export::export_solution;
pub use ext_repr::{
    ExtBinPackingInstance, ExtContainer, ExtItem, ExtPlacement, ExtSettings, ExtSolution,
    ExtStripPackingInstance,
};
pub use import::{import_bin_packing, import_strip_packing};
