//! Command implementations.

mod plan;
mod run;
mod validate;

pub use plan::run_plan;
pub use run::run_reports;
pub use validate::run_validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use contracts::{Dataset, ReportBlueprint};
use tracing::info;

use crate::error::CliError;

/// Load and validate the configuration file
pub(crate) fn load_blueprint(path: &Path) -> Result<ReportBlueprint> {
    if !path.exists() {
        return Err(CliError::config_not_found(path).into());
    }

    config_loader::ConfigLoader::load_from_path(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Load the dataset named by `--dataset` or, failing that, the configuration
pub(crate) fn load_dataset(
    blueprint: &ReportBlueprint,
    dataset: Option<&PathBuf>,
) -> Result<Dataset> {
    let path = dataset
        .or(blueprint.dataset.path.as_ref())
        .ok_or(CliError::DatasetNotConfigured)?;

    info!(dataset = %path.display(), "Loading dataset");
    ingestion::DatasetLoader::load_from_path(path, &blueprint.dataset)
        .with_context(|| format!("Failed to load dataset from {}", path.display()))
}
