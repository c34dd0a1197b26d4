//! `run` command implementation.

use anyhow::{Context, Result};
use contracts::PlatformId;
use tracing::info;

use super::{load_blueprint, load_dataset};
use crate::cli::RunArgs;
use crate::error::CliError;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_reports(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    let mut blueprint = load_blueprint(&args.config)?;

    // Apply CLI overrides
    if !args.platforms.is_empty() {
        if args.platforms.iter().any(|p| p.trim().is_empty()) {
            return Err(CliError::config_validation("--platform values cannot be blank").into());
        }
        info!(platforms = ?args.platforms, "Overriding platform allow-list from CLI");
        blueprint.filter.platforms = args
            .platforms
            .iter()
            .map(|p| PlatformId::from(p.trim()))
            .collect();
    }

    info!(
        platforms = blueprint.filter.platforms.len(),
        split_platforms = blueprint.filter.platform_deliveries.len(),
        sinks = blueprint.sinks.len(),
        "Configuration loaded"
    );

    let dataset = load_dataset(&blueprint, args.dataset.as_ref())?;

    let pipeline = Pipeline::new(PipelineConfig {
        blueprint,
        manifest_path: args.manifest.clone(),
        metrics_port: args.metrics_port,
        dry_run: args.dry_run,
    });

    let stats = pipeline
        .run(&dataset)
        .await
        .context("Report generation failed")?;

    info!(
        partitions = stats.partitions,
        reports = stats.reports,
        rows = stats.rows_dispatched,
        excluded = stats.rows_excluded,
        duration_secs = stats.duration.as_secs_f64(),
        "Report splitter finished"
    );
    stats.print_summary();

    Ok(())
}
