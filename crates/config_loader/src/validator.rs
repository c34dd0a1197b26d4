//! Config validation
//!
//! Rules:
//! - field constraints declared on the blueprint types (non-empty names)
//! - sink names unique
//! - `filter.platforms` entries non-blank
//! - `filter.platform_deliveries` substrings non-blank
//! - platform and delivery columns distinct
//!
//! Platforms that never occur in the dataset are not checked here; they
//! simply yield no partitions.

use std::collections::HashSet;

use contracts::{ContractError, ReportBlueprint};
use validator::Validate;

/// Validate a ReportBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &ReportBlueprint) -> Result<(), ContractError> {
    validate_fields(blueprint)?;
    validate_sink_names(blueprint)?;
    validate_platforms(blueprint)?;
    validate_delivery_names(blueprint)?;
    validate_dataset_columns(blueprint)?;
    Ok(())
}

/// Derived field constraints
fn validate_fields(blueprint: &ReportBlueprint) -> Result<(), ContractError> {
    blueprint
        .validate()
        .map_err(|e| ContractError::config_validation("blueprint", e.to_string()))
}

fn validate_sink_names(blueprint: &ReportBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for sink in &blueprint.sinks {
        if !seen.insert(sink.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("sinks[name={}]", sink.name),
                "duplicate sink name",
            ));
        }
    }
    Ok(())
}

fn validate_platforms(blueprint: &ReportBlueprint) -> Result<(), ContractError> {
    for (idx, platform) in blueprint.filter.platforms.iter().enumerate() {
        if platform.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("filter.platforms[{idx}]"),
                "platform identifier cannot be blank",
            ));
        }
    }
    Ok(())
}

/// A blank substring would match every delivery of the platform
fn validate_delivery_names(blueprint: &ReportBlueprint) -> Result<(), ContractError> {
    for (platform, names) in &blueprint.filter.platform_deliveries {
        for (idx, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ContractError::config_validation(
                    format!("filter.platform_deliveries.{platform}[{idx}]"),
                    "delivery name cannot be blank",
                ));
            }
        }
    }
    Ok(())
}

fn validate_dataset_columns(blueprint: &ReportBlueprint) -> Result<(), ContractError> {
    let dataset = &blueprint.dataset;
    if dataset.platform_column == dataset.delivery_column {
        return Err(ContractError::config_validation(
            "dataset.platform_column / dataset.delivery_column",
            format!(
                "platform and delivery columns must differ, both are '{}'",
                dataset.platform_column
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{SinkConfig, SinkType};
    use std::collections::HashMap;

    fn minimal_blueprint() -> ReportBlueprint {
        let mut bp = ReportBlueprint::default();
        bp.filter.platforms = vec!["A".into(), "B".into()];
        bp.filter
            .platform_deliveries
            .insert("A".into(), vec!["foo".into()]);
        bp.sinks = vec![SinkConfig {
            name: "log".into(),
            sink_type: SinkType::Log,
            params: HashMap::new(),
        }];
        bp
    }

    #[test]
    fn test_valid_blueprint() {
        assert!(validate(&minimal_blueprint()).is_ok());
    }

    #[test]
    fn test_unconstrained_blueprint_is_valid() {
        assert!(validate(&ReportBlueprint::default()).is_ok());
    }

    #[test]
    fn test_empty_sink_name() {
        let mut bp = minimal_blueprint();
        bp.sinks[0].name.clear();
        let err = validate(&bp).unwrap_err();
        assert!(matches!(err, ContractError::ConfigValidation { .. }));
    }

    #[test]
    fn test_duplicate_sink_name() {
        let mut bp = minimal_blueprint();
        bp.sinks.push(bp.sinks[0].clone());
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("duplicate sink name"));
    }

    #[test]
    fn test_blank_platform() {
        let mut bp = minimal_blueprint();
        bp.filter.platforms.push("  ".into());
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("filter.platforms[2]"));
    }

    #[test]
    fn test_blank_delivery_name() {
        let mut bp = minimal_blueprint();
        bp.filter
            .platform_deliveries
            .insert("B".into(), vec!["bar".into(), " ".into()]);
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("platform_deliveries.B[1]"));
    }

    #[test]
    fn test_delivery_platform_outside_allow_list_is_valid() {
        let mut bp = minimal_blueprint();
        bp.filter
            .platform_deliveries
            .insert("C".into(), vec!["zzz".into()]);
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_same_columns() {
        let mut bp = minimal_blueprint();
        bp.dataset.delivery_column = bp.dataset.platform_column.clone();
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn test_empty_column_name() {
        let mut bp = minimal_blueprint();
        bp.dataset.platform_column.clear();
        assert!(validate(&bp).is_err());
    }
}
