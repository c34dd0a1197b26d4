//! Dispatcher - invokes every generator once per partition

use tracing::{debug, info, instrument, warn};

use contracts::{Dataset, PartitionKey, ReportGenerator, SinkConfig};

use crate::error::DispatcherError;
use crate::manifest::ReportManifest;
use crate::metrics::{MetricsSnapshot, SinkMetrics};
use crate::sinks::ConfiguredSink;
use crate::slicer::{Partitioned, partition_rows};

/// Generator with its counters
struct GeneratorSlot<G> {
    generator: G,
    metrics: SinkMetrics,
}

/// Fans partition slices out to generators, in configuration order
pub struct Dispatcher<G = ConfiguredSink> {
    slots: Vec<GeneratorSlot<G>>,
}

impl<G: ReportGenerator> Dispatcher<G> {
    pub fn new(generators: Vec<G>) -> Self {
        let slots = generators
            .into_iter()
            .map(|generator| GeneratorSlot {
                generator,
                metrics: SinkMetrics::new(),
            })
            .collect();
        Self { slots }
    }

    pub fn generator_count(&self) -> usize {
        self.slots.len()
    }

    pub fn generators(&self) -> impl Iterator<Item = &G> {
        self.slots.iter().map(|slot| &slot.generator)
    }

    /// Get metrics for all generators
    pub fn metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        self.slots
            .iter()
            .map(|slot| (slot.generator.name().to_string(), slot.metrics.snapshot()))
            .collect()
    }

    /// Slice `dataset` by `keys` and generate every report
    #[instrument(
        name = "dispatcher_run",
        skip(self, dataset, keys),
        fields(rows = dataset.len(), partitions = keys.len())
    )]
    pub async fn run(
        &mut self,
        dataset: &Dataset,
        keys: &[PartitionKey],
    ) -> Result<ReportManifest, DispatcherError> {
        let parted = partition_rows(dataset, keys);
        self.dispatch(&parted).await
    }

    /// Generate every report for slices that are already cut
    ///
    /// Each slice is dispatched to every generator in turn, including empty
    /// slices. The first generator error stops the run. After the last slice
    /// every generator is finished once.
    #[instrument(
        name = "dispatcher_dispatch",
        skip(self, parted),
        fields(partitions = parted.slices.len(), generators = self.slots.len())
    )]
    pub async fn dispatch(
        &mut self,
        parted: &Partitioned<'_>,
    ) -> Result<ReportManifest, DispatcherError> {
        if self.slots.is_empty() {
            warn!("No generators configured, nothing will be written");
        }

        if parted.excluded > 0 {
            debug!(excluded = parted.excluded, "Rows matched no partition");
        }
        observability::record_rows_excluded(parted.excluded);

        let mut manifest = ReportManifest::new(parted.assigned(), parted.excluded);

        for slice in &parted.slices {
            observability::record_rows_dispatched(slice.len());

            for slot in &mut self.slots {
                let name = slot.generator.name().to_string();
                match slot.generator.generate(slice).await {
                    Ok(report) => {
                        slot.metrics.record_report(report.rows);
                        observability::record_report_generated(&name, true);
                        manifest.push(report);
                    }
                    Err(e) => {
                        slot.metrics.record_failure();
                        observability::record_report_generated(&name, false);
                        return Err(DispatcherError::generation(name, &slice.label, e));
                    }
                }
            }
        }

        self.finish_all().await?;

        info!(
            reports = manifest.report_count(),
            rows = manifest.total_rows,
            excluded = manifest.excluded_rows,
            "Dispatch complete"
        );
        Ok(manifest)
    }

    async fn finish_all(&mut self) -> Result<(), DispatcherError> {
        for slot in &mut self.slots {
            slot.generator
                .finish()
                .await
                .map_err(|source| DispatcherError::Finish {
                    sink: slot.generator.name().to_string(),
                    source,
                })?;
        }
        Ok(())
    }
}

/// Create a dispatcher from sink configs
#[instrument(
    name = "dispatcher_create",
    skip(sink_configs),
    fields(sink_count = sink_configs.len())
)]
pub fn create_dispatcher(sink_configs: &[SinkConfig]) -> Result<Dispatcher, DispatcherError> {
    let generators = sink_configs
        .iter()
        .map(ConfiguredSink::from_config)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Dispatcher::new(generators))
}
