//! CsvSink - one CSV file per partition

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use contracts::{ContractError, GeneratedReport, PartitionSlice, ReportGenerator};
use tracing::{debug, info, instrument};

use super::naming::{FileSinkConfig, ReportNamer};

/// Generator that writes each partition to `<base_path>/<stem>.csv`
pub struct CsvSink {
    name: String,
    namer: ReportNamer,
    written: Vec<PathBuf>,
}

impl CsvSink {
    /// Create a new CsvSink, creating the output directory
    pub fn new(name: impl Into<String>, config: FileSinkConfig) -> std::io::Result<Self> {
        fs::create_dir_all(&config.base_path)?;

        Ok(Self {
            name: name.into(),
            namer: ReportNamer::new(config, "csv"),
            written: Vec::new(),
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        Self::new(name, FileSinkConfig::from_params(params))
    }

    /// Files written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write_slice(path: &Path, slice: &PartitionSlice<'_>) -> csv::Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        let mut header = vec!["platform_id", "delivery_id"];
        header.extend(slice.columns.iter().map(String::as_str));
        writer.write_record(&header)?;

        for row in &slice.rows {
            let mut record = vec![row.platform_id.as_str(), row.delivery_id.as_str()];
            record.extend(row.values.iter().map(String::as_str));
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl ReportGenerator for CsvSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "csv_sink_generate",
        skip(self, slice),
        fields(sink = %self.name, label = %slice.label, rows = slice.len())
    )]
    async fn generate(
        &mut self,
        slice: &PartitionSlice<'_>,
    ) -> Result<GeneratedReport, ContractError> {
        let path = self.namer.path_for(&slice.label);

        Self::write_slice(&path, slice).map_err(|e| {
            ContractError::report_write(&self.name, &slice.label, e.to_string())
        })?;

        debug!(path = %path.display(), "CSV report written");
        self.written.push(path.clone());
        Ok(GeneratedReport::new(&self.name, slice).with_path(path))
    }

    #[instrument(name = "csv_sink_finish", skip(self))]
    async fn finish(&mut self) -> Result<(), ContractError> {
        info!(
            sink = %self.name,
            files = self.written.len(),
            base_path = %self.namer.base_path().display(),
            "CsvSink finished"
        );
        Ok(())
    }
}
