//! Report manifest - what a run produced

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use contracts::{GeneratedReport, PartitionKey};
use serde::{Deserialize, Serialize};

use crate::error::DispatcherError;

/// Every report generated in one run, in dispatch order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportManifest {
    pub generated_at: DateTime<Utc>,
    /// Rows assigned to a partition
    pub total_rows: usize,
    /// Rows that matched no partition
    pub excluded_rows: usize,
    pub reports: Vec<GeneratedReport>,
}

impl ReportManifest {
    pub fn new(total_rows: usize, excluded_rows: usize) -> Self {
        Self {
            generated_at: Utc::now(),
            total_rows,
            excluded_rows,
            reports: Vec::new(),
        }
    }

    pub fn push(&mut self, report: GeneratedReport) {
        self.reports.push(report);
    }

    pub fn report_count(&self) -> usize {
        self.reports.len()
    }

    /// Distinct partitions in dispatch order
    pub fn partitions(&self) -> Vec<&PartitionKey> {
        let mut keys: Vec<&PartitionKey> = Vec::new();
        for report in &self.reports {
            if !keys.contains(&&report.key) {
                keys.push(&report.key);
            }
        }
        keys
    }

    /// Write the manifest as pretty JSON
    pub fn write_json(&self, path: &Path) -> Result<(), DispatcherError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn report(generator: &str, key: &PartitionKey, rows: usize) -> GeneratedReport {
        GeneratedReport {
            generator: generator.to_string(),
            key: key.clone(),
            label: key.label(),
            rows,
            path: None,
        }
    }

    #[test]
    fn test_partitions_deduplicated_in_order() {
        let group = PartitionKey::delivery_group("A", "foo", ["foo-x"]);
        let plain = PartitionKey::platform("B");

        let mut manifest = ReportManifest::new(3, 1);
        manifest.push(report("log", &group, 2));
        manifest.push(report("csv", &group, 2));
        manifest.push(report("log", &plain, 1));

        assert_eq!(manifest.report_count(), 3);
        assert_eq!(manifest.partitions(), vec![&group, &plain]);
    }

    #[test]
    fn test_partitions_sharing_a_label_stay_apart() {
        // platform "A foo" and group "foo" of platform "A" both read "A foo"
        let group = PartitionKey::delivery_group("A", "foo", ["foo-x"]);
        let plain = PartitionKey::platform("A foo");
        assert_eq!(group.label(), plain.label());

        let mut manifest = ReportManifest::new(2, 0);
        manifest.push(report("csv", &group, 1));
        manifest.push(report("csv", &plain, 1));

        assert_eq!(manifest.partitions().len(), 2);
    }

    #[test]
    fn test_write_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("manifest.json");

        let mut manifest = ReportManifest::new(2, 0);
        manifest.push(
            report("csv", &PartitionKey::platform("B"), 2)
                .with_path(PathBuf::from("reports/b.csv")),
        );
        manifest.write_json(&path).unwrap();

        let read: ReportManifest =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, manifest);
    }
}
