//! Single-pass slicing of a dataset by partition keys

use std::collections::HashMap;

use contracts::{Dataset, PartitionKey, PartitionSlice};

/// Slices in key order, plus the rows no key claimed
#[derive(Debug)]
pub struct Partitioned<'a> {
    pub slices: Vec<PartitionSlice<'a>>,
    pub excluded: usize,
}

impl Partitioned<'_> {
    /// Rows assigned to some slice
    pub fn assigned(&self) -> usize {
        self.slices.iter().map(PartitionSlice::len).sum()
    }
}

/// Assign every row of `dataset` to at most one of `keys`
///
/// A row goes to the first key that matches it. Slices are returned in key
/// order, including empty ones.
pub fn partition_rows<'a>(dataset: &'a Dataset, keys: &'a [PartitionKey]) -> Partitioned<'a> {
    let mut by_platform: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, key) in keys.iter().enumerate() {
        by_platform
            .entry(key.platform_id().as_str())
            .or_default()
            .push(idx);
    }

    let mut slices: Vec<PartitionSlice<'a>> = keys
        .iter()
        .map(|key| PartitionSlice::empty(key, dataset))
        .collect();
    let mut excluded = 0;

    for row in &dataset.rows {
        let target = by_platform
            .get(row.platform_id.as_str())
            .and_then(|candidates| candidates.iter().find(|&&idx| keys[idx].matches(row)));

        match target {
            Some(&idx) => slices[idx].rows.push(row),
            None => excluded += 1,
        }
    }

    Partitioned { slices, excluded }
}
