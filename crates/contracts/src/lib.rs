//! # Contracts
//!
//! Shared interface contracts for the report splitter.
//! Every business crate depends on this crate only; reverse dependencies are prohibited.
//!
//! ## Data Model
//! - `Dataset` is an ordered, read-only collection of `DeliveryRecord`s
//! - `PartitionKey` selects a disjoint subset of the dataset
//! - `ReportGenerator` consumes one `PartitionSlice` per key

mod blueprint;
mod dataset;
mod error;
mod generator;
mod partition;
mod platform_id;

pub use blueprint::*;
pub use dataset::*;
pub use error::*;
pub use generator::*;
pub use partition::*;
pub use platform_id::PlatformId;
