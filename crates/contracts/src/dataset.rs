//! Dataset - Ingestion output
//!
//! Tabular delivery records. Two columns are structural (platform and
//! delivery); every other column is carried through to the reports.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::PlatformId;

/// One dataset row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// Platform the row belongs to
    pub platform_id: PlatformId,

    /// Free-text delivery method or carrier label
    pub delivery_id: String,

    /// Extra column values, aligned with `Dataset::columns`
    #[serde(default)]
    pub values: Vec<String>,
}

impl DeliveryRecord {
    /// Create a record without extra columns
    pub fn new(platform_id: impl Into<PlatformId>, delivery_id: impl Into<String>) -> Self {
        Self {
            platform_id: platform_id.into(),
            delivery_id: delivery_id.into(),
            values: Vec::new(),
        }
    }

    /// Attach extra column values
    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        self
    }
}

/// Immutable in-memory dataset snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Names of the extra columns
    pub columns: Vec<String>,

    /// Rows in source order
    pub rows: Vec<DeliveryRecord>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<DeliveryRecord>) -> Self {
        Self { columns, rows }
    }

    /// Dataset with no extra columns
    pub fn from_rows(rows: Vec<DeliveryRecord>) -> Self {
        Self {
            columns: Vec::new(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct platform identifiers in order of first appearance
    pub fn platforms(&self) -> Vec<&PlatformId> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|row| &row.platform_id)
            .filter(|platform| seen.insert(*platform))
            .collect()
    }
}
