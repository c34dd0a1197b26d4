//! Delivery-name matching.
//!
//! A delivery identifier belongs to a group when its trimmed, lowercased
//! form contains the trimmed, lowercased group name. Each identifier joins
//! at most one group: the first configured name that matches.

use std::collections::BTreeSet;

/// Matches delivery identifiers against the configured names of one platform
#[derive(Debug, Clone)]
pub struct DeliveryMatcher<'a> {
    /// (configured name, normalized name), duplicates removed
    names: Vec<(&'a str, String)>,
}

impl<'a> DeliveryMatcher<'a> {
    pub fn new(names: &'a [String]) -> Self {
        let mut matcher = Self {
            names: Vec::with_capacity(names.len()),
        };
        for name in names {
            let normalized = normalize(name);
            // a repeated name could never win a first-match tie-break
            if !matcher.names.iter().any(|(_, n)| *n == normalized) {
                matcher.names.push((name.as_str(), normalized));
            }
        }
        matcher
    }

    /// First configured name contained in `delivery`
    pub fn first_match(&self, delivery: &str) -> Option<&'a str> {
        let delivery = normalize(delivery);
        self.names
            .iter()
            .find(|(_, needle)| delivery.contains(needle.as_str()))
            .map(|(name, _)| *name)
    }

    /// Assign every delivery identifier to its group
    ///
    /// Returns non-empty groups in configured order. Names that match nothing
    /// are left out.
    pub fn group<'d, I>(&self, deliveries: I) -> Vec<(&'a str, BTreeSet<String>)>
    where
        I: IntoIterator<Item = &'d str>,
    {
        let mut groups: Vec<(&'a str, BTreeSet<String>)> = self
            .names
            .iter()
            .map(|(name, _)| (*name, BTreeSet::new()))
            .collect();

        for delivery in deliveries {
            if let Some(name) = self.first_match(delivery) {
                if let Some((_, members)) = groups.iter_mut().find(|(n, _)| *n == name) {
                    members.insert(delivery.to_string());
                }
            }
        }

        groups.retain(|(_, members)| !members.is_empty());
        groups
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
