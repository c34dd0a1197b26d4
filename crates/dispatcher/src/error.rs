//! Dispatcher error types

use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Sink creation error
    #[error("failed to create sink '{name}': {message}")]
    SinkCreation { name: String, message: String },

    /// A generator failed on one partition; the run stops here
    #[error("sink '{sink}' failed to generate report '{label}'")]
    Generation {
        sink: String,
        label: String,
        #[source]
        source: contracts::ContractError,
    },

    /// A generator failed while finishing
    #[error("sink '{sink}' failed to finish")]
    Finish {
        sink: String,
        #[source]
        source: contracts::ContractError,
    },

    /// Manifest could not be written
    #[error("failed to write manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DispatcherError {
    /// Create a sink creation error
    pub fn sink_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a generation error
    pub fn generation(
        sink: impl Into<String>,
        label: impl Into<String>,
        source: contracts::ContractError,
    ) -> Self {
        Self::Generation {
            sink: sink.into(),
            label: label.into(),
            source,
        }
    }
}
