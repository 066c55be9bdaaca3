use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// External (JSON) view of a container, as read from an instance file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtContainer {
    pub width: u32,
    pub length: u32,
}

/// External (JSON) view of an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtItem {
    pub width: u32,
    pub length: u32,
}

/// External (JSON) view of solver settings; every field optional so a
/// partial settings object falls back to [`crate::problem::Settings::default`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_time_in_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers_num: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<bool>,
}

/// A bin-packing instance: named containers, named items, optional settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtBinPackingInstance {
    pub containers: BTreeMap<String, ExtContainer>,
    pub items: BTreeMap<String, ExtItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ExtSettings>,
}

/// A strip-packing instance: named items, a fixed strip width, optional settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtStripPackingInstance {
    pub items: BTreeMap<String, ExtItem>,
    pub strip_pack_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ExtSettings>,
}

/// `[x, y, width, length]` of one placement, in the external representation.
pub type ExtPlacement = [u32; 4];

/// External (JSON) view of a solution: container id -> item id -> placement.
pub type ExtSolution = BTreeMap<String, BTreeMap<String, ExtPlacement>>;
