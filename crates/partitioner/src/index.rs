//! One-pass platform/delivery index of a dataset.

use std::collections::{HashMap, HashSet};

use contracts::{Dataset, PlatformId};

/// Distinct platforms with their distinct delivery identifiers
#[derive(Debug, Default)]
pub(crate) struct DeliveryIndex<'a> {
    /// Platforms in order of first appearance
    platforms: Vec<PlatformEntry<'a>>,
}

#[derive(Debug)]
pub(crate) struct PlatformEntry<'a> {
    pub platform: &'a PlatformId,
    /// Delivery identifiers in order of first appearance
    pub deliveries: Vec<&'a str>,
}

impl<'a> DeliveryIndex<'a> {
    pub fn build(dataset: &'a Dataset) -> Self {
        let mut positions: HashMap<&'a str, usize> = HashMap::new();
        let mut seen: HashSet<(usize, &'a str)> = HashSet::new();
        let mut platforms: Vec<PlatformEntry<'a>> = Vec::new();

        for row in &dataset.rows {
            let idx = *positions.entry(row.platform_id.as_str()).or_insert_with(|| {
                platforms.push(PlatformEntry {
                    platform: &row.platform_id,
                    deliveries: Vec::new(),
                });
                platforms.len() - 1
            });
            if seen.insert((idx, row.delivery_id.as_str())) {
                platforms[idx].deliveries.push(&row.delivery_id);
            }
        }

        Self { platforms }
    }

    pub fn platforms(&self) -> impl Iterator<Item = &PlatformEntry<'a>> {
        self.platforms.iter()
    }
}
