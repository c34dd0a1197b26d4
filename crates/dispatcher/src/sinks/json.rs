//! JsonSink - one JSON file per partition

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use contracts::{ContractError, GeneratedReport, PartitionSlice, ReportGenerator};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use super::naming::{FileSinkConfig, ReportNamer};

/// Generator that writes each partition to `<base_path>/<stem>.json`
///
/// Each file holds an array with one object per row: the platform and
/// delivery columns followed by the extra columns.
pub struct JsonSink {
    name: String,
    namer: ReportNamer,
    written: usize,
}

impl JsonSink {
    pub fn new(name: impl Into<String>, config: FileSinkConfig) -> std::io::Result<Self> {
        fs::create_dir_all(&config.base_path)?;

        Ok(Self {
            name: name.into(),
            namer: ReportNamer::new(config, "json"),
            written: 0,
        })
    }

    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        Self::new(name, FileSinkConfig::from_params(params))
    }

    fn to_value(slice: &PartitionSlice<'_>) -> Value {
        let rows = slice
            .rows
            .iter()
            .map(|row| {
                let mut object = Map::new();
                object.insert("platform_id".into(), row.platform_id.as_str().into());
                object.insert("delivery_id".into(), row.delivery_id.as_str().into());
                for (column, value) in slice.columns.iter().zip(&row.values) {
                    object.insert(column.clone(), value.as_str().into());
                }
                Value::Object(object)
            })
            .collect();
        Value::Array(rows)
    }

    fn write_slice(path: &Path, slice: &PartitionSlice<'_>) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &Self::to_value(slice))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

impl ReportGenerator for JsonSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "json_sink_generate",
        skip(self, slice),
        fields(sink = %self.name, label = %slice.label, rows = slice.len())
    )]
    async fn generate(
        &mut self,
        slice: &PartitionSlice<'_>,
    ) -> Result<GeneratedReport, ContractError> {
        let path: PathBuf = self.namer.path_for(&slice.label);

        Self::write_slice(&path, slice).map_err(|e| {
            ContractError::report_write(&self.name, &slice.label, e.to_string())
        })?;

        debug!(path = %path.display(), "JSON report written");
        self.written += 1;
        Ok(GeneratedReport::new(&self.name, slice).with_path(path))
    }

    #[instrument(name = "json_sink_finish", skip(self))]
    async fn finish(&mut self) -> Result<(), ContractError> {
        info!(sink = %self.name, files = self.written, "JsonSink finished");
        Ok(())
    }
}
