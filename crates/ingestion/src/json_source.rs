//! JSON dataset source
//!
//! Expects an array of flat objects. Nested values are kept as their JSON text.

use std::collections::BTreeSet;
use std::io::Read;

use contracts::{ContractError, Dataset, DatasetConfig, DeliveryRecord};
use serde_json::{Map, Value};

type JsonRow = Map<String, Value>;

/// Read a JSON array of records
pub fn read_json<R: Read>(reader: R, config: &DatasetConfig) -> Result<Dataset, ContractError> {
    let objects: Vec<JsonRow> =
        serde_json::from_reader(reader).map_err(|e| ContractError::DatasetLoad {
            message: format!("JSON parse error: {e}"),
            source: Some(Box::new(e)),
        })?;

    let columns: Vec<String> = objects
        .iter()
        .flat_map(|obj| obj.keys())
        .filter(|key| **key != config.platform_column && **key != config.delivery_column)
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rows = objects
        .iter()
        .map(|obj| to_record(obj, &columns, config))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::new(columns, rows))
}

fn to_record(
    obj: &JsonRow,
    columns: &[String],
    config: &DatasetConfig,
) -> Result<DeliveryRecord, ContractError> {
    let required = |name: &str| {
        obj.get(name)
            .map(value_to_string)
            .ok_or_else(|| ContractError::missing_column(name))
    };
    let platform = required(config.platform_column.as_str())?;
    let delivery = required(config.delivery_column.as_str())?;
    let values = columns
        .iter()
        .map(|column| obj.get(column).map(value_to_string).unwrap_or_default())
        .collect();

    Ok(DeliveryRecord::new(platform, delivery).with_values(values))
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
