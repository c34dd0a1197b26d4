//! Layered error definitions
//!
//! Categorized by source: config / dataset / report

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Dataset Errors =====
    /// Dataset could not be read or decoded
    #[error("dataset load error: {message}")]
    DatasetLoad {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Required column absent from the dataset header
    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: String },

    // ===== Report Errors =====
    /// Report generation failed inside a generator
    #[error("generator '{generator}' failed for '{label}': {message}")]
    ReportWrite {
        generator: String,
        label: String,
        message: String,
    },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create dataset load error
    pub fn dataset_load(message: impl Into<String>) -> Self {
        Self::DatasetLoad {
            message: message.into(),
            source: None,
        }
    }

    /// Create missing column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create report write error
    pub fn report_write(
        generator: impl Into<String>,
        label: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ReportWrite {
            generator: generator.into(),
            label: label.into(),
            message: message.into(),
        }
    }
}
