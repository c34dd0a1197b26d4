//! # Dispatcher
//!
//! 报表分发模块。
//!
//! 负责：
//! - 按分区键对数据集只切分一次
//! - Fan-out 到每个已配置的 generator
//! - 汇总生成结果为 `ReportManifest`

pub mod dispatcher;
pub mod error;
pub mod manifest;
pub mod metrics;
pub mod sinks;
pub mod slicer;

pub use contracts::{PartitionSlice, ReportGenerator};
pub use dispatcher::{Dispatcher, create_dispatcher};
pub use error::DispatcherError;
pub use manifest::ReportManifest;
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use sinks::{ConfiguredSink, CsvSink, FileSinkConfig, JsonSink, LogSink};
pub use slicer::{Partitioned, partition_rows};
