//! `plan` command implementation.

use anyhow::{Context, Result};
use contracts::PartitionKey;
use dispatcher::partition_rows;
use partitioner::PartitionSelector;
use serde::Serialize;
use tracing::info;

use super::{load_blueprint, load_dataset};
use crate::cli::PlanArgs;

/// Partition plan for JSON output
#[derive(Serialize)]
struct Plan {
    strategy: String,
    partitions: Vec<PlannedPartition>,
    excluded_rows: usize,
}

#[derive(Serialize)]
struct PlannedPartition {
    label: String,
    key: PartitionKey,
    rows: usize,
}

/// Execute the `plan` command
pub fn run_plan(args: &PlanArgs) -> Result<()> {
    info!(config = %args.config.display(), "Planning partitions");

    let blueprint = load_blueprint(&args.config)?;
    let dataset = load_dataset(&blueprint, args.dataset.as_ref())?;

    let selector = PartitionSelector::new(blueprint.filter);
    let keys = selector.select(&dataset);
    let parted = partition_rows(&dataset, &keys);

    let plan = Plan {
        strategy: format!("{:?}", selector.strategy()),
        partitions: parted
            .slices
            .iter()
            .map(|slice| PlannedPartition {
                label: slice.label.clone(),
                key: slice.key.clone(),
                rows: slice.len(),
            })
            .collect(),
        excluded_rows: parted.excluded,
    };

    if args.json {
        let json = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
        println!("{}", json);
    } else {
        print_plan(&plan);
    }

    Ok(())
}

fn print_plan(plan: &Plan) {
    println!("\n=== Partition Plan ({}) ===\n", plan.strategy);

    if plan.partitions.is_empty() {
        println!("  (no partitions)");
    }
    for partition in &plan.partitions {
        println!("  - {} ({} rows)", partition.label, partition.rows);
        if let PartitionKey::DeliveryGroup { deliveries, .. } = &partition.key {
            for delivery in deliveries {
                println!("      {}", delivery);
            }
        }
    }

    println!("\n  Excluded rows: {}", plan.excluded_rows);
    println!();
}
