//! Pipeline orchestrator - selection, dispatch and manifest.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use contracts::{Dataset, ReportBlueprint};
use dispatcher::partition_rows;
use partitioner::PartitionSelector;
use tracing::{info, warn};

use super::RunStats;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The report blueprint, with CLI overrides applied
    pub blueprint: ReportBlueprint,

    /// Where to write the report manifest (None = not written)
    pub manifest_path: Option<PathBuf>,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,

    /// Select partitions without generating reports
    pub dry_run: bool,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline over `dataset`
    pub async fn run(self, dataset: &Dataset) -> Result<RunStats> {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
        }

        let keys = PartitionSelector::new(blueprint.filter.clone()).select(dataset);
        if keys.is_empty() {
            warn!("No partitions selected, nothing to generate");
        }

        let parted = partition_rows(dataset, &keys);
        let mut stats = RunStats {
            partitions: keys.len(),
            rows_dispatched: parted.assigned(),
            rows_excluded: parted.excluded,
            partition_sizes: parted.slices.iter().map(|s| s.len()).collect(),
            dry_run: self.config.dry_run,
            ..Default::default()
        };

        if self.config.dry_run {
            for slice in &parted.slices {
                info!(label = %slice.label, rows = slice.len(), "Partition");
            }
            stats.duration = start_time.elapsed();
            info!("Dry run mode - partitions selected, exiting");
            return Ok(stats);
        }

        let mut dispatcher = dispatcher::create_dispatcher(&blueprint.sinks)
            .context("Failed to create sinks")?;
        let manifest = dispatcher.dispatch(&parted).await?;

        if let Some(path) = &self.config.manifest_path {
            manifest
                .write_json(path)
                .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
            info!(path = %path.display(), reports = manifest.report_count(), "Manifest written");
        }

        stats.reports = manifest.report_count();
        stats.sinks = dispatcher.metrics();
        stats.duration = start_time.elapsed();

        Ok(stats)
    }
}
