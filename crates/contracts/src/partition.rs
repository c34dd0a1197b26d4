//! PartitionKey / PartitionSlice - Partitioner output, Dispatcher input

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::{Dataset, DeliveryRecord, PlatformId};

/// Unit of grouping passed to report generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartitionKey {
    /// Every row of a platform
    Platform { platform: PlatformId },

    /// Rows of a platform whose delivery identifier is in `deliveries`
    DeliveryGroup {
        platform: PlatformId,
        /// Configured delivery-name substring that formed the group
        group: String,
        /// Exact delivery identifiers matched by `group`
        deliveries: BTreeSet<String>,
    },
}

impl PartitionKey {
    pub fn platform(platform: impl Into<PlatformId>) -> Self {
        Self::Platform {
            platform: platform.into(),
        }
    }

    pub fn delivery_group<I, S>(
        platform: impl Into<PlatformId>,
        group: impl Into<String>,
        deliveries: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::DeliveryGroup {
            platform: platform.into(),
            group: group.into(),
            deliveries: deliveries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn platform_id(&self) -> &PlatformId {
        match self {
            Self::Platform { platform } | Self::DeliveryGroup { platform, .. } => platform,
        }
    }

    /// Delivery-group label, `None` for a plain platform key
    pub fn group(&self) -> Option<&str> {
        match self {
            Self::Platform { .. } => None,
            Self::DeliveryGroup { group, .. } => Some(group),
        }
    }

    /// Human-readable report label: the platform, suffixed with the group name
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Whether `record` belongs to this partition
    pub fn matches(&self, record: &DeliveryRecord) -> bool {
        match self {
            Self::Platform { platform } => record.platform_id == *platform,
            Self::DeliveryGroup {
                platform,
                deliveries,
                ..
            } => record.platform_id == *platform && deliveries.contains(&record.delivery_id),
        }
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Platform { platform } => write!(f, "{platform}"),
            Self::DeliveryGroup {
                platform, group, ..
            } => write!(f, "{platform} {group}"),
        }
    }
}

/// Rows of one partition, borrowed from the dataset
#[derive(Debug, Clone)]
pub struct PartitionSlice<'a> {
    /// Partition the rows were selected for
    pub key: &'a PartitionKey,

    /// Report label derived from the key
    pub label: String,

    /// Extra column names of the source dataset
    pub columns: &'a [String],

    /// Matching rows in dataset order
    pub rows: Vec<&'a DeliveryRecord>,
}

impl<'a> PartitionSlice<'a> {
    /// Empty slice for `key` over `dataset`
    pub fn empty(key: &'a PartitionKey, dataset: &'a Dataset) -> Self {
        Self {
            key,
            label: key.label(),
            columns: &dataset.columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct delivery identifiers present in the slice, sorted
    pub fn deliveries(&self) -> BTreeSet<&'a str> {
        self.rows.iter().map(|row| row.delivery_id.as_str()).collect()
    }
}
