//! Report file naming

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Output settings shared by the file-writing sinks
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Base output directory
    pub base_path: PathBuf,
    /// Prepended to every file stem
    pub prefix: Option<String>,
}

impl FileSinkConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let base_path = params
            .get("base_path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./reports"));
        let prefix = params
            .get("prefix")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Self { base_path, prefix }
    }
}

/// File stem for a report label
///
/// Lowercased, with every run of non-alphanumeric characters collapsed into
/// a single `_` and no leading or trailing `_`.
pub fn file_stem(label: &str) -> String {
    let mut stem = String::with_capacity(label.len());
    let mut pending_sep = false;

    for c in label.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !stem.is_empty() {
                stem.push('_');
            }
            pending_sep = false;
            stem.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }

    if stem.is_empty() {
        stem.push_str("report");
    }
    stem
}

/// Hands out unique paths within one output directory
#[derive(Debug)]
pub struct ReportNamer {
    config: FileSinkConfig,
    extension: &'static str,
    /// Every stem handed out so far, suffixed or not
    issued: HashSet<String>,
}

impl ReportNamer {
    pub fn new(config: FileSinkConfig, extension: &'static str) -> Self {
        Self {
            config,
            extension,
            issued: HashSet::new(),
        }
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.config.base_path
    }

    /// Path for `label`, suffixed `_2`, `_3`, ... until the stem is unused
    pub fn path_for(&mut self, label: &str) -> PathBuf {
        let mut base = file_stem(label);
        if let Some(prefix) = &self.config.prefix {
            base = format!("{prefix}_{base}");
        }

        let mut stem = base.clone();
        let mut suffix = 1;
        while self.issued.contains(&stem) {
            suffix += 1;
            stem = format!("{base}_{suffix}");
        }
        self.issued.insert(stem.clone());

        self.config
            .base_path
            .join(format!("{stem}.{}", self.extension))
    }
}
