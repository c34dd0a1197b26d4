//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约序列化格式测试
//! - 配置文件 + 数据文件 -> 分区 -> 报表的 e2e 测试
//! - 随机数据集上的分区互斥性

#[cfg(test)]
mod contract_tests {
    use contracts::{Dataset, DeliveryRecord, GeneratedReport, PartitionKey, PartitionSlice};
    use serde_json::json;

    #[test]
    fn test_partition_key_wire_format() {
        let group = PartitionKey::delivery_group("A", "foo", ["foo-b", "foo-a"]);
        assert_eq!(
            serde_json::to_value(&group).unwrap(),
            json!({
                "kind": "delivery_group",
                "platform": "A",
                "group": "foo",
                "deliveries": ["foo-a", "foo-b"],
            })
        );
        assert_eq!(
            serde_json::to_value(PartitionKey::platform("B")).unwrap(),
            json!({ "kind": "platform", "platform": "B" })
        );
    }

    #[test]
    fn test_generated_report_wire_format() {
        let dataset = Dataset::from_rows(vec![DeliveryRecord::new("B", "bar")]);
        let key = PartitionKey::platform("B");
        let mut slice = PartitionSlice::empty(&key, &dataset);
        slice.rows.push(&dataset.rows[0]);

        let report = GeneratedReport::new("log", &slice);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "generator": "log",
                "key": { "kind": "platform", "platform": "B" },
                "label": "B",
                "rows": 1,
            })
        );
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::collections::{HashMap, HashSet};
    use std::fs;
    use std::path::Path;

    use contracts::{
        ContractError, Dataset, DeliveryRecord, FilterConfig, GeneratedReport, PartitionKey,
        PartitionSlice, ReportGenerator, SinkConfig, SinkType,
    };
    use dispatcher::{Dispatcher, DispatcherError, ReportManifest, create_dispatcher};
    use partitioner::PartitionSelector;

    const DATASET_CSV: &str = "\
platform_id,delivery_id,order_id,status
Amazon,Prime Express,1001,shipped
Ebay,Standard,1002,pending
Amazon,prime standard,1003,shipped
Amazon,Pickup,1004,new
Shopify,Courier,1005,shipped
Ebay,Standard,1006,new
";

    fn write_fixture(dir: &Path, filter: &str) -> std::path::PathBuf {
        fs::write(dir.join("updates.csv"), DATASET_CSV).unwrap();
        let config = format!(
            r#"
[dataset]
path = "updates.csv"

{filter}

[[sinks]]
name = "log"
sink_type = "log"

[[sinks]]
name = "csv"
sink_type = "csv"

[sinks.params]
base_path = "{}"
"#,
            dir.join("reports").display()
        );
        let config_path = dir.join("report.toml");
        fs::write(&config_path, config).unwrap();
        config_path
    }

    async fn run_config(config_path: &Path) -> (Dataset, Vec<PartitionKey>, ReportManifest) {
        let blueprint = config_loader::ConfigLoader::load_from_path(config_path).unwrap();
        let dataset = ingestion::DatasetLoader::load(&blueprint.dataset).unwrap();
        let keys = PartitionSelector::new(blueprint.filter.clone()).select(&dataset);
        let mut dispatcher = create_dispatcher(&blueprint.sinks).unwrap();
        let manifest = dispatcher.run(&dataset, &keys).await.unwrap();
        (dataset, keys, manifest)
    }

    #[tokio::test]
    async fn test_e2e_delivery_split() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_fixture(
            dir.path(),
            r#"
[filter]
platforms = ["Amazon", "Ebay"]

[filter.platform_deliveries]
Amazon = ["prime"]
"#,
        );

        let (_, keys, manifest) = run_config(&config_path).await;

        let labels: Vec<String> = keys.iter().map(PartitionKey::label).collect();
        assert_eq!(labels, vec!["Amazon prime", "Ebay"]);

        // two sinks per partition
        assert_eq!(manifest.report_count(), 4);
        assert_eq!(manifest.partitions(), keys.iter().collect::<Vec<_>>());
        // Amazon/Pickup and Shopify/Courier
        assert_eq!(manifest.excluded_rows, 2);
        assert_eq!(manifest.total_rows, 4);

        let amazon = fs::read_to_string(dir.path().join("reports/amazon_prime.csv")).unwrap();
        assert_eq!(
            amazon,
            "platform_id,delivery_id,order_id,status\n\
             Amazon,Prime Express,1001,shipped\n\
             Amazon,prime standard,1003,shipped\n"
        );
        let ebay = fs::read_to_string(dir.path().join("reports/ebay.csv")).unwrap();
        assert_eq!(ebay.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_e2e_unconstrained_filter() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_fixture(dir.path(), "");

        let (dataset, keys, manifest) = run_config(&config_path).await;

        assert_eq!(
            keys,
            vec![
                PartitionKey::platform("Amazon"),
                PartitionKey::platform("Ebay"),
                PartitionKey::platform("Shopify"),
            ]
        );
        assert_eq!(manifest.total_rows, dataset.len());
        assert_eq!(manifest.excluded_rows, 0);
        for stem in ["amazon", "ebay", "shopify"] {
            assert!(dir.path().join("reports").join(format!("{stem}.csv")).exists());
        }
    }

    #[tokio::test]
    async fn test_e2e_manifest_written() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_fixture(
            dir.path(),
            r#"
[filter]
platforms = ["Shopify"]
"#,
        );

        let (_, _, manifest) = run_config(&config_path).await;
        let manifest_path = dir.path().join("manifest.json");
        manifest.write_json(&manifest_path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
        let reports = value["reports"].as_array().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0]["generator"], "log");
        assert!(reports[0].get("path").is_none());
        assert_eq!(reports[1]["label"], "Shopify");
        assert!(reports[1]["path"].as_str().unwrap().ends_with("shopify.csv"));
    }

    struct FailingGenerator;

    impl ReportGenerator for FailingGenerator {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate(
            &mut self,
            slice: &PartitionSlice<'_>,
        ) -> Result<GeneratedReport, ContractError> {
            Err(ContractError::report_write("failing", &slice.label, "mailbox full"))
        }

        async fn finish(&mut self) -> Result<(), ContractError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_e2e_generator_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_fixture(dir.path(), "");
        let blueprint = config_loader::ConfigLoader::load_from_path(&config_path).unwrap();
        let dataset = ingestion::DatasetLoader::load(&blueprint.dataset).unwrap();
        let keys = PartitionSelector::new(blueprint.filter).select(&dataset);

        let mut dispatcher = Dispatcher::new(vec![FailingGenerator]);
        let err = dispatcher.run(&dataset, &keys).await.unwrap_err();

        assert!(matches!(err, DispatcherError::Generation { ref label, .. } if label == "Amazon"));
        assert!(err.to_string().contains("failing"));
    }

    #[tokio::test]
    async fn test_e2e_colliding_labels_get_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = Dataset::from_rows(vec![
            DeliveryRecord::new("A", "foo-x"),
            DeliveryRecord::new("A foo", "y"),
            DeliveryRecord::new("A foo 2", "z"),
        ]);
        let mut filter = FilterConfig::default();
        filter
            .platform_deliveries
            .insert("A".into(), vec!["foo".to_string()]);
        let keys = PartitionSelector::new(filter).select(&dataset);
        let labels: Vec<String> = keys.iter().map(PartitionKey::label).collect();
        assert_eq!(labels, vec!["A foo", "A foo", "A foo 2"]);

        let sinks = vec![SinkConfig {
            name: "csv".to_string(),
            sink_type: SinkType::Csv,
            params: HashMap::from([(
                "base_path".to_string(),
                dir.path().display().to_string(),
            )]),
        }];
        let mut dispatcher = create_dispatcher(&sinks).unwrap();
        let manifest = dispatcher.run(&dataset, &keys).await.unwrap();

        let paths: HashSet<&Path> = manifest
            .reports
            .iter()
            .filter_map(|report| report.path.as_deref())
            .collect();
        assert_eq!(paths.len(), 3);
        assert_eq!(manifest.partitions().len(), 3);

        for report in &manifest.reports {
            let content = fs::read_to_string(report.path.as_ref().unwrap()).unwrap();
            let row = content.lines().nth(1).unwrap();
            assert!(row.starts_with(&format!("{},", report.key.platform_id())));
        }
    }
}

#[cfg(test)]
mod exclusivity_tests {
    use std::collections::{BTreeMap, HashMap};

    use contracts::{Dataset, DeliveryRecord, FilterConfig, PlatformId};
    use dispatcher::partition_rows;
    use partitioner::PartitionSelector;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // "A foo" shares its label with the ("A", "foo") delivery group
    const PLATFORMS: &[&str] = &["A", "B", "C", "A foo", "B express"];
    const DELIVERIES: &[&str] = &[
        "Foo Express",
        "foo-standard",
        " BAR ",
        "bar pickup",
        "courier",
        "express courier",
    ];
    const NAMES: &[&str] = &["foo", "express", "bar", "zzz", "courier"];

    fn random_dataset(rng: &mut StdRng) -> Dataset {
        let len = rng.random_range(0..40);
        Dataset::from_rows(
            (0..len)
                .map(|_| {
                    let platform = PLATFORMS[rng.random_range(0..PLATFORMS.len())];
                    let delivery = DELIVERIES[rng.random_range(0..DELIVERIES.len())];
                    DeliveryRecord::new(platform, delivery)
                })
                .collect(),
        )
    }

    fn random_filter(rng: &mut StdRng) -> FilterConfig {
        let platforms = PLATFORMS
            .iter()
            .filter(|_| rng.random_bool(0.4))
            .map(|p| PlatformId::from(*p))
            .collect();

        let mut platform_deliveries = BTreeMap::new();
        for platform in PLATFORMS {
            if rng.random_bool(0.3) {
                let names = NAMES
                    .iter()
                    .filter(|_| rng.random_bool(0.5))
                    .map(|n| n.to_string())
                    .collect();
                platform_deliveries.insert(PlatformId::from(*platform), names);
            }
        }

        FilterConfig {
            platforms,
            platform_deliveries,
        }
    }

    /// No row lands in two slices, assigned + excluded covers the dataset,
    /// and a platform with delivery groups never gets a plain key.
    #[test]
    fn test_partitions_are_exclusive() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..500 {
            let dataset = random_dataset(&mut rng);
            let filter = random_filter(&mut rng);
            let keys = PartitionSelector::new(filter).select(&dataset);

            let mut matches_per_row: HashMap<usize, usize> = HashMap::new();
            for (idx, row) in dataset.rows.iter().enumerate() {
                let hits = keys.iter().filter(|key| key.matches(row)).count();
                matches_per_row.insert(idx, hits);
            }
            assert!(matches_per_row.values().all(|&hits| hits <= 1));

            let parted = partition_rows(&dataset, &keys);
            let matched = matches_per_row.values().filter(|&&hits| hits == 1).count();
            assert_eq!(parted.assigned(), matched);
            assert_eq!(parted.assigned() + parted.excluded, dataset.len());

            for key in keys.iter().filter(|key| key.group().is_some()) {
                assert!(!keys.contains(&contracts::PartitionKey::platform(
                    key.platform_id().clone()
                )));
            }

            for (idx, key) in keys.iter().enumerate() {
                assert!(!keys[idx + 1..].contains(key), "duplicate key {key}");
            }
        }
    }
}
