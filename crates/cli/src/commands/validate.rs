//! `validate` command implementation.

use std::collections::HashSet;

use anyhow::{Context, Result};
use contracts::{Dataset, ReportBlueprint};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    dataset: Option<String>,
    platform_count: usize,
    split_platform_count: usize,
    delivery_group_count: usize,
    sink_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let dataset = try_load_dataset(&blueprint);
            let warnings = collect_warnings(&blueprint, dataset.as_ref());

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    dataset: blueprint
                        .dataset
                        .path
                        .as_ref()
                        .map(|p| p.display().to_string()),
                    platform_count: blueprint.filter.platforms.len(),
                    split_platform_count: blueprint.filter.platform_deliveries.len(),
                    delivery_group_count: blueprint
                        .filter
                        .platform_deliveries
                        .values()
                        .map(Vec::len)
                        .sum(),
                    sink_count: blueprint.sinks.len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Load the configured dataset, if it can be read
fn try_load_dataset(blueprint: &ReportBlueprint) -> Option<Dataset> {
    let path = blueprint.dataset.path.as_ref()?;
    match ingestion::DatasetLoader::load_from_path(path, &blueprint.dataset) {
        Ok(dataset) => Some(dataset),
        Err(e) => {
            warn!(
                dataset = %path.display(),
                error = %e,
                "Dataset unreadable, skipping dataset checks"
            );
            None
        }
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &ReportBlueprint, dataset: Option<&Dataset>) -> Vec<String> {
    let mut warnings = Vec::new();
    let filter = &blueprint.filter;

    if blueprint.sinks.is_empty() {
        warnings.push(
            "No sinks configured - partitions will be selected but no reports written".to_string(),
        );
    }

    if blueprint.dataset.path.is_none() {
        warnings.push("dataset.path is not set - pass --dataset when running".to_string());
    }

    if filter.restricts_platforms() {
        for platform in filter.platform_deliveries.keys() {
            if !filter.allows(platform) {
                warnings.push(format!(
                    "Platform '{platform}' has delivery groups but is not in filter.platforms \
                     - its groups are still generated"
                ));
            }
        }
    }

    if let Some(dataset) = dataset {
        let present: HashSet<&str> = dataset.platforms().into_iter().map(|p| p.as_str()).collect();
        let configured = filter
            .platforms
            .iter()
            .chain(filter.platform_deliveries.keys());
        let mut reported = HashSet::new();
        for platform in configured {
            if !present.contains(platform.as_str()) && reported.insert(platform.as_str()) {
                warnings.push(format!(
                    "Platform '{platform}' does not appear in the dataset \
                     - no report will be generated for it"
                ));
            }
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            if let Some(ref dataset) = summary.dataset {
                println!("  Dataset: {}", dataset);
            }
            println!("  Allowed platforms: {}", summary.platform_count);
            println!(
                "  Split platforms: {} ({} delivery groups)",
                summary.split_platform_count, summary.delivery_group_count
            );
            println!("  Sinks: {}", summary.sink_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
