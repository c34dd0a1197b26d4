//! Run statistics.

use std::time::Duration;

use dispatcher::MetricsSnapshot;
use observability::RunningStats;

/// Statistics from a report run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Partition keys selected
    pub partitions: usize,

    /// Reports generated across all sinks
    pub reports: usize,

    /// Rows assigned to a partition
    pub rows_dispatched: usize,

    /// Rows that matched no partition
    pub rows_excluded: usize,

    /// Total duration of the run
    pub duration: Duration,

    /// Rows per partition
    pub partition_sizes: RunningStats,

    /// Per-sink counters
    pub sinks: Vec<(String, MetricsSnapshot)>,

    /// Whether reports were actually generated
    pub dry_run: bool,
}

impl RunStats {
    /// Share of dataset rows that landed in some partition, as percentage
    pub fn coverage(&self) -> f64 {
        let total = self.rows_dispatched + self.rows_excluded;
        if total > 0 {
            (self.rows_dispatched as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Report Run Statistics ===\n");

        println!("Overview");
        println!("  Duration: {:.3}s", self.duration.as_secs_f64());
        println!("  Partitions: {}", self.partitions);
        println!("  Rows dispatched: {}", self.rows_dispatched);
        println!(
            "  Rows excluded: {} (coverage {:.1}%)",
            self.rows_excluded,
            self.coverage()
        );
        println!("  Partition size: {}", self.partition_sizes.summary());

        if self.dry_run {
            println!("\nDry run: no reports generated");
        } else {
            println!("\nSinks ({} reports)", self.reports);
            for (name, snapshot) in &self.sinks {
                println!(
                    "  - {}: {} reports, {} rows, {} failures",
                    name, snapshot.report_count, snapshot.row_count, snapshot.failure_count
                );
            }
        }

        println!();
    }
}
