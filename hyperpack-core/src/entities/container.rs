use anyhow::{Result, bail};

/// A fixed-width, fixed-length rectangular container.
///
/// In strip-packing mode a single container with id [`STRIP_PACK_CONTAINER_ID`]
/// is used, and its `length` is mutated via [`crate::problem::Problem::set_container_height`]
/// rather than through this constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub width: u32,
    pub length: u32,
}

/// Identifier used for the single container in strip-packing mode.
pub const STRIP_PACK_CONTAINER_ID: &str = "strip-pack-container";

impl Container {
    pub fn new(id: impl Into<String>, width: u32, length: u32) -> Result<Self> {
        if width == 0 || length == 0 {
            bail!("container dimensions must be positive integers");
        }
        Ok(Self {
            id: id.into(),
            width,
            length,
        })
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.length as u64
    }
}
