//! ConfiguredSink - a generator chosen by `SinkType`

use contracts::{
    ContractError, GeneratedReport, PartitionSlice, ReportGenerator, SinkConfig, SinkType,
};
use tracing::instrument;

use super::{CsvSink, JsonSink, LogSink};
use crate::error::DispatcherError;

/// Any built-in generator
pub enum ConfiguredSink {
    Log(LogSink),
    Csv(CsvSink),
    Json(JsonSink),
}

impl ConfiguredSink {
    /// Build the generator described by `config`
    #[instrument(
        name = "dispatcher_create_sink",
        skip(config),
        fields(sink = %config.name, sink_type = ?config.sink_type)
    )]
    pub fn from_config(config: &SinkConfig) -> Result<Self, DispatcherError> {
        match config.sink_type {
            SinkType::Log => Ok(Self::Log(LogSink::new(&config.name))),
            SinkType::Csv => CsvSink::from_params(&config.name, &config.params)
                .map(Self::Csv)
                .map_err(|e| DispatcherError::sink_creation(&config.name, e.to_string())),
            SinkType::Json => JsonSink::from_params(&config.name, &config.params)
                .map(Self::Json)
                .map_err(|e| DispatcherError::sink_creation(&config.name, e.to_string())),
        }
    }
}

impl ReportGenerator for ConfiguredSink {
    fn name(&self) -> &str {
        match self {
            Self::Log(sink) => sink.name(),
            Self::Csv(sink) => sink.name(),
            Self::Json(sink) => sink.name(),
        }
    }

    async fn generate(
        &mut self,
        slice: &PartitionSlice<'_>,
    ) -> Result<GeneratedReport, ContractError> {
        match self {
            Self::Log(sink) => sink.generate(slice).await,
            Self::Csv(sink) => sink.generate(slice).await,
            Self::Json(sink) => sink.generate(slice).await,
        }
    }

    async fn finish(&mut self) -> Result<(), ContractError> {
        match self {
            Self::Log(sink) => sink.finish().await,
            Self::Csv(sink) => sink.finish().await,
            Self::Json(sink) => sink.finish().await,
        }
    }
}
