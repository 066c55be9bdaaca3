use anyhow::{Context, Result};

use crate::entities::{Container, Item};
use crate::problem::{Problem, Settings};

use super::ext_repr::{ExtBinPackingInstance, ExtSettings, ExtStripPackingInstance};

fn resolve_settings(ext: Option<ExtSettings>) -> Settings {
    let defaults = Settings::default();
    match ext {
        None => defaults,
        Some(ext) => Settings {
            max_time_in_seconds: ext.max_time_in_seconds.unwrap_or(defaults.max_time_in_seconds),
            workers_num: ext.workers_num.unwrap_or(defaults.workers_num),
            rotation: ext.rotation.unwrap_or(defaults.rotation),
        },
    }
}

/// Build a bin-packing [`Problem`] from its external representation.
/// Container/item insertion order follows the JSON map's key order
/// (alphabetical, since [`crate::io::ext_repr`] uses `BTreeMap`).
pub fn import_bin_packing(instance: ExtBinPackingInstance) -> Result<Problem> {
    let containers = instance
        .containers
        .into_iter()
        .map(|(id, c)| Container::new(id, c.width, c.length))
        .collect::<Result<Vec<_>>>()
        .context("invalid container in bin packing instance")?;

    let items = instance
        .items
        .into_iter()
        .map(|(id, i)| Item::new(id, i.width, i.length))
        .collect::<Result<Vec<_>>>()
        .context("invalid item in bin packing instance")?;

    let settings = resolve_settings(instance.settings);
    Problem::new_bin_packing(containers, items, settings)
}

/// Build a strip-packing [`Problem`] from its external representation.
pub fn import_strip_packing(instance: ExtStripPackingInstance) -> Result<Problem> {
    let items = instance
        .items
        .into_iter()
        .map(|(id, i)| Item::new(id, i.width, i.length))
        .collect::<Result<Vec<_>>>()
        .context("invalid item in strip packing instance")?;

    let settings = resolve_settings(instance.settings);
    Problem::new_strip_packing(items, instance.strip_pack_width, settings)
}
