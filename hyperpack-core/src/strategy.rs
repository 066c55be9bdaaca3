use anyhow::{Result, bail};
use itertools::Itertools;

use crate::geometry::{PointCategory, PointQueues};

/// An ordered preference list over the ten point categories: the
/// [`crate::construct`] loop drains the first non-empty queue in this
/// order on every step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Strategy(pub Vec<PointCategory>);

/// The permutable prefix hypersearch shuffles exhaustively.
pub const PERMUTABLE_PREFIX: [PointCategory; 6] = [
    PointCategory::A,
    PointCategory::B,
    PointCategory::C,
    PointCategory::D,
    PointCategory::APrime,
    PointCategory::BPrime,
];

/// Fixed suffix appended after the permutable prefix, bin-packing order.
pub const BIN_PACK_SUFFIX: [PointCategory; 4] = [
    PointCategory::ADouble,
    PointCategory::BDouble,
    PointCategory::F,
    PointCategory::E,
];

/// Fixed suffix appended after the permutable prefix, strip-packing order.
pub const STRIP_PACK_SUFFIX: [PointCategory; 4] = [
    PointCategory::BDouble,
    PointCategory::ADouble,
    PointCategory::F,
    PointCategory::E,
];

impl Strategy {
    pub fn new(categories: Vec<PointCategory>) -> Result<Self> {
        if categories.len() != categories.iter().unique().count() {
            bail!("strategy must not contain duplicate point categories");
        }
        Ok(Self(categories))
    }

    /// The default strategy: declaration order of [`PointCategory::ALL`].
    pub fn default_order() -> Self {
        Self(PointCategory::ALL.to_vec())
    }

    /// All 720 permutations of the permutable prefix, each followed by
    /// the mode-appropriate fixed suffix.
    pub fn exhaustive(strip_pack: bool) -> Vec<Strategy> {
        let suffix = if strip_pack {
            STRIP_PACK_SUFFIX
        } else {
            BIN_PACK_SUFFIX
        };
        PERMUTABLE_PREFIX
            .into_iter()
            .permutations(6)
            .map(|mut prefix| {
                prefix.extend_from_slice(&suffix);
                Strategy(prefix)
            })
            .collect()
    }

    /// Scan categories in strategy order, dequeueing the first non-empty
    /// queue's head. `None` means every queue is exhausted.
    pub fn next_point(&self, queues: &mut PointQueues) -> Option<(u32, u32)> {
        for &category in &self.0 {
            if let Some(point) = queues.pop(category) {
                return Some(point);
            }
        }
        None
    }

    /// A small, non-exhaustive pool of hand-picked strategies, used when
    /// hypersearch runs with `exhaustive=false`.
    pub fn pool(strip_pack: bool) -> Vec<Strategy> {
        let suffix = if strip_pack {
            STRIP_PACK_SUFFIX
        } else {
            BIN_PACK_SUFFIX
        };
        let prefixes: [[PointCategory; 6]; 4] = [
            [
                PointCategory::A,
                PointCategory::B,
                PointCategory::C,
                PointCategory::D,
                PointCategory::APrime,
                PointCategory::BPrime,
            ],
            [
                PointCategory::B,
                PointCategory::A,
                PointCategory::D,
                PointCategory::C,
                PointCategory::BPrime,
                PointCategory::APrime,
            ],
            [
                PointCategory::C,
                PointCategory::D,
                PointCategory::A,
                PointCategory::B,
                PointCategory::APrime,
                PointCategory::BPrime,
            ],
            [
                PointCategory::APrime,
                PointCategory::BPrime,
                PointCategory::A,
                PointCategory::B,
                PointCategory::C,
                PointCategory::D,
            ],
        ];
        prefixes
            .into_iter()
            .map(|prefix| {
                let mut v = prefix.to_vec();
                v.extend_from_slice(&suffix);
                Strategy(v)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhaustive_has_720_distinct_strategies() {
        let strategies = Strategy::exhaustive(false);
        assert_eq!(strategies.len(), 720);
        assert_eq!(strategies.iter().unique().count(), 720);
    }

    #[test]
    fn rejects_duplicate_categories() {
        let err = Strategy::new(vec![PointCategory::A, PointCategory::A]);
        assert!(err.is_err());
    }
}
