//! # Ingestion
//!
//! Dataset loading module.
//!
//! Responsibilities:
//! - Read CSV / JSON delivery records into a `Dataset`
//! - Map the configured platform / delivery columns onto `DeliveryRecord`
//! - Carry every other column through unchanged
//!
//! ## Usage Example
//!
//! ```no_run
//! use contracts::DatasetConfig;
//! use ingestion::DatasetLoader;
//! use std::path::Path;
//!
//! let config = DatasetConfig::default();
//! let dataset = DatasetLoader::load_from_path(Path::new("updates.csv"), &config).unwrap();
//! println!("rows: {}", dataset.len());
//! ```

mod csv_source;
mod json_source;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use contracts::{ContractError, Dataset, DatasetConfig, DatasetFormat};
use metrics::counter;
use tracing::{info, instrument};

pub use contracts::DeliveryRecord;

/// Dataset loader
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load the dataset named by `config.path`
    pub fn load(config: &DatasetConfig) -> Result<Dataset, ContractError> {
        let path = config
            .path
            .as_deref()
            .ok_or_else(|| ContractError::dataset_load("no dataset path configured"))?;
        Self::load_from_path(path, config)
    }

    /// Load a dataset file
    ///
    /// The format comes from `config.format`, or from the file extension.
    ///
    /// # Errors
    /// - File open failure
    /// - Unsupported format
    /// - Missing platform / delivery column
    /// - Malformed record
    #[instrument(
        name = "dataset_load_from_path",
        skip(path, config),
        fields(path = %path.display())
    )]
    pub fn load_from_path(path: &Path, config: &DatasetConfig) -> Result<Dataset, ContractError> {
        let format = Self::detect_format(path, config)?;
        let file = File::open(path).map_err(|e| ContractError::DatasetLoad {
            message: format!("cannot open {}: {e}", path.display()),
            source: Some(Box::new(e)),
        })?;
        let dataset = Self::load_from_reader(BufReader::new(file), format, config)?;

        info!(
            rows = dataset.len(),
            columns = dataset.columns.len(),
            platforms = dataset.platforms().len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }

    /// Load a dataset from any reader
    pub fn load_from_reader<R: Read>(
        reader: R,
        format: DatasetFormat,
        config: &DatasetConfig,
    ) -> Result<Dataset, ContractError> {
        let dataset = match format {
            DatasetFormat::Csv => csv_source::read_csv(reader, config)?,
            DatasetFormat::Json => json_source::read_json(reader, config)?,
        };
        counter!("report_splitter_rows_loaded_total").increment(dataset.len() as u64);
        Ok(dataset)
    }

    fn detect_format(path: &Path, config: &DatasetConfig) -> Result<DatasetFormat, ContractError> {
        if let Some(format) = config.format {
            return Ok(format);
        }
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::dataset_load("cannot determine dataset format from extension")
        })?;
        DatasetFormat::from_extension(ext).ok_or_else(|| {
            ContractError::dataset_load(format!("unsupported dataset format: .{ext}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_csv_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("updates.csv");
        std::fs::write(&path, "platform_id,delivery_id\nA,foo\nB,bar\n").unwrap();

        let dataset = DatasetLoader::load_from_path(&path, &DatasetConfig::default()).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_explicit_format_overrides_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("updates.txt");
        std::fs::write(&path, r#"[{"platform_id": "A", "delivery_id": "foo"}]"#).unwrap();

        let config = DatasetConfig {
            format: Some(DatasetFormat::Json),
            ..DatasetConfig::default()
        };
        let dataset = DatasetLoader::load_from_path(&path, &config).unwrap();
        assert_eq!(dataset.rows[0].platform_id, "A");
    }

    #[test]
    fn test_unsupported_extension() {
        let err =
            DatasetLoader::load_from_path(Path::new("updates.xlsx"), &DatasetConfig::default())
                .unwrap_err();
        assert!(err.to_string().contains("unsupported dataset format"));
    }

    #[test]
    fn test_load_without_path() {
        let err = DatasetLoader::load(&DatasetConfig::default()).unwrap_err();
        assert!(matches!(err, ContractError::DatasetLoad { .. }));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = DatasetLoader::load_from_path(&path, &DatasetConfig::default()).unwrap_err();
        assert!(err.to_string().contains("cannot open"));
    }
}
