//! Report run metrics
//!
//! Counters and gauges recorded through the `metrics` facade, plus an
//! in-process size accumulator for end-of-run summaries.

use metrics::{counter, gauge, histogram};

/// Record the outcome of partition selection
pub fn record_partitions_selected(delivery_groups: usize, plain: usize) {
    gauge!("report_splitter_partitions_selected", "kind" => "delivery_group")
        .set(delivery_groups as f64);
    gauge!("report_splitter_partitions_selected", "kind" => "platform").set(plain as f64);
}

/// Record one generator invocation
pub fn record_report_generated(sink_name: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "report_splitter_reports_generated_total",
        "sink" => sink_name.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record the size of a dispatched partition
pub fn record_rows_dispatched(rows: usize) {
    counter!("report_splitter_rows_dispatched_total").increment(rows as u64);
    histogram!("report_splitter_partition_rows").record(rows as f64);
}

/// Record rows that matched no partition
pub fn record_rows_excluded(rows: usize) {
    gauge!("report_splitter_rows_excluded").set(rows as f64);
}

/// Size summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.0}, max={:.0}, mean={:.1}, std={:.1} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary::from(self)
    }
}

impl FromIterator<usize> for RunningStats {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut stats = Self::default();
        for value in iter {
            stats.push(value as f64);
        }
        stats
    }
}
