//! Generator implementations
//!
//! Contains LogSink, CsvSink, JsonSink, and the config-driven ConfiguredSink.

mod configured;
mod csv;
mod json;
mod log;
mod naming;

pub use self::configured::ConfiguredSink;
pub use self::csv::CsvSink;
pub use self::json::JsonSink;
pub use self::log::LogSink;
pub use self::naming::{FileSinkConfig, ReportNamer, file_stem};
