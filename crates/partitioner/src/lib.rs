//! # Partitioner
//!
//! 分区选择：决定一个数据集产出哪些报表。
//!
//! 负责：
//! - 应用 `platforms` 白名单
//! - 按子串匹配把已配置的平台拆成配送分组
//! - 输出有序且不重复的 `PartitionKey` 列表
//!
//! ## 使用示例
//!
//! ```
//! use contracts::{Dataset, DeliveryRecord, FilterConfig, PartitionKey};
//! use partitioner::PartitionSelector;
//!
//! let dataset = Dataset::from_rows(vec![
//!     DeliveryRecord::new("A", "foo-express"),
//!     DeliveryRecord::new("B", "bar"),
//! ]);
//! let mut filter = FilterConfig::default();
//! filter.platform_deliveries.insert("A".into(), vec!["foo".into()]);
//!
//! let keys = PartitionSelector::new(filter).select(&dataset);
//! assert_eq!(keys[0], PartitionKey::delivery_group("A", "foo", ["foo-express"]));
//! assert_eq!(keys[1], PartitionKey::platform("B"));
//! ```

mod index;
mod matcher;
mod selector;
mod strategy;

pub use contracts::{FilterConfig, PartitionKey};
pub use matcher::DeliveryMatcher;
pub use selector::PartitionSelector;
pub use strategy::SelectionStrategy;
