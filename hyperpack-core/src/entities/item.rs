use anyhow::{Result, bail};

/// A rectangular item to be placed, identified by a caller-chosen id.
///
/// Dimensions are fixed at construction; the placement an item ends up
/// with (origin, rotation) lives in the [`crate::entities::Solution`], not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub width: u32,
    pub length: u32,
}

impl Item {
    pub fn new(id: impl Into<String>, width: u32, length: u32) -> Result<Self> {
        if width == 0 || length == 0 {
            bail!("item dimensions must be positive integers");
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

    pub fn perimeter(&self) -> u64 {
        2 * (self.width as u64 + self.length as u64)
    }

    /// max(w,l) / min(w,l), always >= 1.
    pub fn longest_side_ratio(&self) -> f64 {
        let (a, b) = (self.width.max(self.length), self.width.min(self.length));
        a as f64 / b as f64
    }

    /// Swap width/length in place so that width >= length.
    pub fn orient_wide(&mut self) {
        if self.width < self.length {
            std::mem::swap(&mut self.width, &mut self.length);
        }
    }

    /// Swap width/length in place so that width <= length.
    pub fn orient_long(&mut self) {
        if self.width > self.length {
            std::mem::swap(&mut self.width, &mut self.length);
        }
    }
}
