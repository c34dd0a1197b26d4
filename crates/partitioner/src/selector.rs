//! Partition selector.

use std::collections::HashSet;

use contracts::{Dataset, FilterConfig, PartitionKey};
use tracing::{debug, info, instrument};

use crate::index::DeliveryIndex;
use crate::matcher::DeliveryMatcher;
use crate::strategy::SelectionStrategy;

/// Turns a filter configuration into partition keys for a dataset
#[derive(Debug, Clone)]
pub struct PartitionSelector {
    filter: FilterConfig,
    strategy: SelectionStrategy,
}

impl PartitionSelector {
    pub fn new(filter: FilterConfig) -> Self {
        let strategy = SelectionStrategy::for_filter(&filter);
        Self { filter, strategy }
    }

    pub fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    /// Select the partition keys for `dataset`
    ///
    /// Delivery-group keys come first, per platform in order of first
    /// appearance and per group in configured order. Plain platform keys
    /// follow. A platform that produced a delivery group never also gets a
    /// plain key, so no row can fall into two partitions.
    #[instrument(
        name = "partition_select",
        skip(self, dataset),
        fields(rows = dataset.len(), strategy = ?self.strategy)
    )]
    pub fn select(&self, dataset: &Dataset) -> Vec<PartitionKey> {
        let index = DeliveryIndex::build(dataset);

        let groups = match self.strategy {
            SelectionStrategy::PlainPlatform => Vec::new(),
            SelectionStrategy::PlatformDelivery => self.delivery_groups(&index),
        };

        let grouped: HashSet<&str> = groups
            .iter()
            .map(|key| key.platform_id().as_str())
            .collect();

        let plain: Vec<PartitionKey> = index
            .platforms()
            .map(|entry| entry.platform)
            .filter(|platform| self.filter.allows(platform))
            .filter(|platform| !grouped.contains(platform.as_str()))
            .map(|platform| PartitionKey::platform(platform.clone()))
            .collect();

        info!(
            delivery_groups = groups.len(),
            plain = plain.len(),
            "Partitions selected"
        );
        observability::record_partitions_selected(groups.len(), plain.len());

        groups.into_iter().chain(plain).collect()
    }

    /// Delivery-group keys for every dataset platform listed in
    /// `platform_deliveries`, regardless of the allow-list
    fn delivery_groups(&self, index: &DeliveryIndex<'_>) -> Vec<PartitionKey> {
        let mut keys = Vec::new();

        for entry in index.platforms() {
            let names = self.filter.delivery_names(entry.platform);
            if names.is_empty() {
                continue;
            }

            let groups = DeliveryMatcher::new(names).group(entry.deliveries.iter().copied());
            if groups.is_empty() {
                debug!(platform = %entry.platform, "No delivery matched, keeping platform plain");
            }

            keys.extend(
                groups
                    .into_iter()
                    .map(|(group, deliveries)| PartitionKey::DeliveryGroup {
                        platform: entry.platform.clone(),
                        group: group.to_string(),
                        deliveries,
                    }),
            );
        }

        keys
    }
}
