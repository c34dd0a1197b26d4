//! LogSink - logs a partition summary via tracing

use contracts::{ContractError, GeneratedReport, PartitionSlice, ReportGenerator};
use tracing::{info, instrument};

/// Generator that logs partition summaries
pub struct LogSink {
    name: String,
    reports: usize,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reports: 0,
        }
    }

    fn log_summary(&self, slice: &PartitionSlice<'_>) {
        let deliveries: Vec<&str> = slice.deliveries().into_iter().collect();

        info!(
            sink = %self.name,
            label = %slice.label,
            platform = %slice.key.platform_id(),
            group = slice.key.group(),
            rows = slice.len(),
            deliveries = ?deliveries,
            "Report generated"
        );
    }
}

impl ReportGenerator for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_generate",
        skip(self, slice),
        fields(sink = %self.name, label = %slice.label)
    )]
    async fn generate(
        &mut self,
        slice: &PartitionSlice<'_>,
    ) -> Result<GeneratedReport, ContractError> {
        self.log_summary(slice);
        self.reports += 1;
        Ok(GeneratedReport::new(&self.name, slice))
    }

    #[instrument(name = "log_sink_finish", skip(self))]
    async fn finish(&mut self) -> Result<(), ContractError> {
        info!(sink = %self.name, reports = self.reports, "LogSink finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{Dataset, DeliveryRecord, PartitionKey};

    #[tokio::test]
    async fn test_log_sink_generate() {
        let dataset = Dataset::from_rows(vec![DeliveryRecord::new("A", "foo")]);
        let key = PartitionKey::platform("A");
        let mut slice = PartitionSlice::empty(&key, &dataset);
        slice.rows.push(&dataset.rows[0]);

        let mut sink = LogSink::new("test_log");
        let report = sink.generate(&slice).await.unwrap();
        assert_eq!(report.label, "A");
        assert_eq!(report.rows, 1);
        assert!(report.path.is_none());
        assert!(sink.finish().await.is_ok());
    }

    #[tokio::test]
    async fn test_log_sink_name() {
        let sink = LogSink::new("my_logger");
        assert_eq!(sink.name(), "my_logger");
    }
}
