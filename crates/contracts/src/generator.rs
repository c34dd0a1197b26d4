//! ReportGenerator trait - Dispatcher output interface
//!
//! Defines the abstract interface for report generators.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{ContractError, PartitionKey, PartitionSlice};

/// Report generation trait
///
/// All generator implementations must implement this trait.
#[trait_variant::make(ReportGenerator: Send)]
pub trait LocalReportGenerator {
    /// Generator name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Generate the report for one partition
    ///
    /// # Errors
    /// Returns write error (should include the partition label)
    async fn generate(
        &mut self,
        slice: &PartitionSlice<'_>,
    ) -> Result<GeneratedReport, ContractError>;

    /// Called once after the last partition
    async fn finish(&mut self) -> Result<(), ContractError>;
}

/// Outcome of generating one report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedReport {
    /// Generator that produced the report
    pub generator: String,

    /// Partition the report covers
    pub key: PartitionKey,

    /// Partition label; two distinct keys may share one
    pub label: String,

    /// Number of rows in the report
    pub rows: usize,

    /// Output file, for generators that write one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl GeneratedReport {
    pub fn new(generator: impl Into<String>, slice: &PartitionSlice<'_>) -> Self {
        Self {
            generator: generator.into(),
            key: slice.key.clone(),
            label: slice.label.clone(),
            rows: slice.len(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }
}
