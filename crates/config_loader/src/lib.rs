//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Generate `ReportBlueprint`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let blueprint = ConfigLoader::load_from_path(Path::new("reports.toml")).unwrap();
//! println!("Sinks: {}", blueprint.sinks.len());
//! ```

mod parser;
mod validator;

pub use contracts::ReportBlueprint;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;
use tracing::{debug, instrument};

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    /// A relative `dataset.path` is resolved against the config file's directory.
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    #[instrument(name = "config_load_from_path", skip(path), fields(path = %path.display()))]
    pub fn load_from_path(path: &Path) -> Result<ReportBlueprint, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        let mut blueprint = Self::load_from_str(&content, format)?;
        Self::resolve_dataset_path(&mut blueprint, path);
        Ok(blueprint)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<ReportBlueprint, ContractError> {
        Self::parse_and_validate(content, format)
    }

    /// Serialize ReportBlueprint to TOML string
    pub fn to_toml(blueprint: &ReportBlueprint) -> Result<String, ContractError> {
        toml::to_string_pretty(blueprint)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize ReportBlueprint to JSON string
    pub fn to_json(blueprint: &ReportBlueprint) -> Result<String, ContractError> {
        serde_json::to_string_pretty(blueprint)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn resolve_dataset_path(blueprint: &mut ReportBlueprint, config_path: &Path) {
        let Some(dataset_path) = blueprint.dataset.path.as_mut() else {
            return;
        };
        if dataset_path.is_relative() {
            if let Some(dir) = config_path.parent() {
                *dataset_path = dir.join(&*dataset_path);
                debug!(dataset = %dataset_path.display(), "Resolved dataset path");
            }
        }
    }

    /// Parse and validate configuration content
    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<ReportBlueprint, ContractError> {
        let blueprint = parser::parse(content, format)?;
        validator::validate(&blueprint)?;
        Ok(blueprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_TOML: &str = r#"
[dataset]
path = "updates.csv"

[filter]
platforms = ["A", "B"]

[filter.platform_deliveries]
A = ["foo"]

[[sinks]]
name = "log_sink"
sink_type = "log"
"#;

    #[test]
    fn test_load_from_str_toml() {
        let result = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.filter.platforms.len(), 2);
        assert_eq!(bp.sinks[0].name, "log_sink");
    }

    #[test]
    fn test_round_trip_json() {
        let bp = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&bp).unwrap();
        let bp2 = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(bp.filter, bp2.filter);
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let content = r#"
[filter.platform_deliveries]
A = [""]
"#;
        let result = ConfigLoader::load_from_str(content, ConfigFormat::Toml);
        assert!(result.unwrap_err().to_string().contains("cannot be blank"));
    }

    #[test]
    fn test_load_from_path_resolves_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("reports.toml");
        std::fs::write(&config_path, MINIMAL_TOML).unwrap();

        let bp = ConfigLoader::load_from_path(&config_path).unwrap();
        assert_eq!(bp.dataset.path, Some(dir.path().join("updates.csv")));
    }

    #[test]
    fn test_load_from_path_unsupported_extension() {
        let err = ConfigLoader::load_from_path(Path::new("reports.yaml")).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }
}
