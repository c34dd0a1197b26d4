//! Selection strategy.

use contracts::FilterConfig;

/// How platforms are turned into partitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// One partition per platform
    PlainPlatform,
    /// Configured platforms are split into delivery groups, the rest stay plain
    PlatformDelivery,
}

impl SelectionStrategy {
    /// Pick the strategy for a filter: delivery splitting applies as soon as
    /// any platform lists at least one delivery name
    pub fn for_filter(filter: &FilterConfig) -> Self {
        if filter.splits_deliveries() {
            Self::PlatformDelivery
        } else {
            Self::PlainPlatform
        }
    }
}
