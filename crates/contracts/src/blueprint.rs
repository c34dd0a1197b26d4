//! ReportBlueprint - Config Loader output
//!
//! Describes one complete run: where the dataset lives, how it is filtered
//! into partitions, and which generators receive every partition.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use validator::Validate;

use crate::PlatformId;

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete report run blueprint
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReportBlueprint {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Dataset source
    #[serde(default)]
    #[validate(nested)]
    pub dataset: DatasetConfig,

    /// Partition selection rules
    #[serde(default)]
    pub filter: FilterConfig,

    /// Report generators, invoked in order for every partition
    #[serde(default)]
    #[validate(nested)]
    pub sinks: Vec<SinkConfig>,
}

/// Dataset source configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatasetConfig {
    /// Dataset file; may be supplied on the command line instead
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// File format; inferred from the extension when absent
    #[serde(default)]
    pub format: Option<DatasetFormat>,

    /// Column holding the platform identifier
    #[serde(default = "default_platform_column")]
    #[validate(length(min = 1))]
    pub platform_column: String,

    /// Column holding the delivery identifier
    #[serde(default = "default_delivery_column")]
    #[validate(length(min = 1))]
    pub delivery_column: String,
}

fn default_platform_column() -> String {
    "platform_id".to_string()
}

fn default_delivery_column() -> String {
    "delivery_id".to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            format: None,
            platform_column: default_platform_column(),
            delivery_column: default_delivery_column(),
        }
    }
}

/// Dataset file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetFormat {
    Csv,
    Json,
}

impl DatasetFormat {
    /// Infer the format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Partition selection rules
///
/// An empty `platforms` list means no platform restriction; an empty
/// `platform_deliveries` map means no delivery-level split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Allowed platform identifiers
    #[serde(default)]
    pub platforms: Vec<PlatformId>,

    /// Platform -> ordered delivery-name substrings
    #[serde(default)]
    pub platform_deliveries: BTreeMap<PlatformId, Vec<String>>,
}

impl FilterConfig {
    /// Whether an allow-list is configured
    pub fn restricts_platforms(&self) -> bool {
        !self.platforms.is_empty()
    }

    /// Whether any platform is split by delivery name
    pub fn splits_deliveries(&self) -> bool {
        self.platform_deliveries.values().any(|names| !names.is_empty())
    }

    /// Whether `platform` passes the allow-list
    pub fn allows(&self, platform: &str) -> bool {
        !self.restricts_platforms() || self.platforms.iter().any(|p| p == platform)
    }

    /// Delivery-name substrings configured for `platform`
    pub fn delivery_names(&self, platform: &str) -> &[String] {
        self.platform_deliveries
            .get(platform)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Report generator configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SinkConfig {
    /// Generator name (used for logs, metrics and the manifest)
    #[validate(length(min = 1))]
    pub name: String,

    /// Generator type
    pub sink_type: SinkType,

    /// Generator specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Report generator type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// Log a summary of every partition
    Log,
    /// Write one CSV file per partition
    Csv,
    /// Write one JSON file per partition
    Json,
}
