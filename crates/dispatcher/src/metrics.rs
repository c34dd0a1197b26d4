//! Per-sink counters

/// Counters for a single sink
#[derive(Debug, Default, Clone)]
pub struct SinkMetrics {
    /// Reports generated
    report_count: u64,
    /// Rows written across all reports
    row_count: u64,
    /// Failed generate calls
    failure_count: u64,
}

impl SinkMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful report of `rows` rows
    pub fn record_report(&mut self, rows: usize) {
        self.report_count += 1;
        self.row_count += rows as u64;
    }

    pub fn record_failure(&mut self) {
        self.failure_count += 1;
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            report_count: self.report_count,
            row_count: self.row_count,
            failure_count: self.failure_count,
        }
    }
}

/// Point-in-time copy of SinkMetrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub report_count: u64,
    pub row_count: u64,
    pub failure_count: u64,
}
