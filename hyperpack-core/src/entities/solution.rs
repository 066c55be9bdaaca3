use std::collections::BTreeMap;

use super::placement::Placement;

/// A full solution: for each container id, the placements of the items
/// that landed in it. An item id appears in at most one container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solution {
    pub containers: BTreeMap<String, BTreeMap<String, Placement>>,
}

impl Solution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(&self, container_id: &str) -> Option<&BTreeMap<String, Placement>> {
        self.containers.get(container_id)
    }

    pub fn placed_item_ids(&self) -> impl Iterator<Item = &str> {
        self.containers
            .values()
            .flat_map(|items| items.keys().map(String::as_str))
    }

    pub fn total_placed(&self) -> usize {
        self.containers.values().map(|m| m.len()).sum()
    }
}
