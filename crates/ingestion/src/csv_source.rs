//! CSV dataset source

use std::collections::HashMap;
use std::io::Read;

use contracts::{ContractError, Dataset, DatasetConfig, DeliveryRecord, PlatformId};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

/// Column positions resolved from the header row
struct ColumnLayout {
    platform: usize,
    delivery: usize,
    extra: Vec<usize>,
}

impl ColumnLayout {
    fn resolve(headers: &StringRecord, config: &DatasetConfig) -> Result<Self, ContractError> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ContractError::missing_column(name))
        };
        let platform = position(config.platform_column.as_str())?;
        let delivery = position(config.delivery_column.as_str())?;
        let extra = (0..headers.len())
            .filter(|&idx| idx != platform && idx != delivery)
            .collect();

        Ok(Self {
            platform,
            delivery,
            extra,
        })
    }

    fn column_names(&self, headers: &StringRecord) -> Vec<String> {
        self.extra
            .iter()
            .map(|&idx| headers[idx].to_string())
            .collect()
    }
}

/// Read CSV records; the first row must be a header
pub fn read_csv<R: Read>(reader: R, config: &DatasetConfig) -> Result<Dataset, ContractError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);
    let headers = rdr.headers().map_err(csv_error)?.clone();
    let layout = ColumnLayout::resolve(&headers, config)?;

    // one shared allocation per platform value
    let mut interned: HashMap<String, PlatformId> = HashMap::new();
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result.map_err(csv_error)?;
        let raw_platform = &record[layout.platform];
        let platform_id = match interned.get(raw_platform) {
            Some(id) => id.clone(),
            None => {
                let id = PlatformId::new(raw_platform);
                interned.insert(raw_platform.to_string(), id.clone());
                id
            }
        };
        let values = layout
            .extra
            .iter()
            .map(|&idx| record[idx].to_string())
            .collect();

        rows.push(DeliveryRecord {
            platform_id,
            delivery_id: record[layout.delivery].to_string(),
            values,
        });
    }

    debug!(rows = rows.len(), platforms = interned.len(), "CSV parsed");
    Ok(Dataset::new(layout.column_names(&headers), rows))
}

fn csv_error(e: csv::Error) -> ContractError {
    ContractError::DatasetLoad {
        message: format!("CSV parse error: {e}"),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(platform: &str, delivery: &str) -> DatasetConfig {
        DatasetConfig {
            platform_column: platform.into(),
            delivery_column: delivery.into(),
            ..DatasetConfig::default()
        }
    }

    #[test]
    fn test_read_with_extra_columns() {
        let data = "\
sku,darkstore_group_platform,darkstore_group_delivery,price
1,A,foo-express,10
2,B,bar,20
";
        let dataset = read_csv(
            data.as_bytes(),
            &config("darkstore_group_platform", "darkstore_group_delivery"),
        )
        .unwrap();

        assert_eq!(dataset.columns, vec!["sku", "price"]);
        assert_eq!(dataset.rows[0].platform_id, "A");
        assert_eq!(dataset.rows[0].delivery_id, "foo-express");
        assert_eq!(dataset.rows[0].values, vec!["1", "10"]);
        assert_eq!(dataset.rows[1].values, vec!["2", "20"]);
    }

    #[test]
    fn test_platform_ids_are_interned() {
        let data = "platform_id,delivery_id\nA,x\nA,y\n";
        let dataset = read_csv(data.as_bytes(), &DatasetConfig::default()).unwrap();
        assert_eq!(
            dataset.rows[0].platform_id.as_str().as_ptr(),
            dataset.rows[1].platform_id.as_str().as_ptr()
        );
    }

    #[test]
    fn test_values_are_kept_verbatim() {
        let data = "platform_id,delivery_id\nA,\"  Foo Express \"\n";
        let dataset = read_csv(data.as_bytes(), &DatasetConfig::default()).unwrap();
        assert_eq!(dataset.rows[0].delivery_id, "  Foo Express ");
    }

    #[test]
    fn test_missing_column() {
        let data = "platform,delivery_id\nA,foo\n";
        let err = read_csv(data.as_bytes(), &DatasetConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ContractError::MissingColumn { ref column } if column == "platform_id"
        ));
    }

    #[test]
    fn test_ragged_row_is_rejected() {
        let data = "platform_id,delivery_id\nA,foo,extra\n";
        let err = read_csv(data.as_bytes(), &DatasetConfig::default()).unwrap_err();
        assert!(matches!(err, ContractError::DatasetLoad { .. }));
    }

    #[test]
    fn test_header_only() {
        let data = "platform_id,delivery_id\n";
        let dataset = read_csv(data.as_bytes(), &DatasetConfig::default()).unwrap();
        assert!(dataset.is_empty());
    }
}
