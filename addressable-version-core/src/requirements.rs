//! Minimum bundle versions required by the host application

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// Mapping from bundle id to the minimum bundle version the host needs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyRequirements {
    entries: IndexMap<String, String>,
}

impl DependencyRequirements {
    /// Create an empty requirement set
    pub fn new() -> Self {
        Self::default()
    }

    /// Require at least `version` of `bundle_id`, returning the previous requirement
    pub fn set<I: Into<String>, V: Into<String>>(&mut self, bundle_id: I, version: V) -> Option<String> {
        self.entries.insert(bundle_id.into(), version.into())
    }

    /// Drop the requirement for `bundle_id`
    pub fn remove(&mut self, bundle_id: &str) -> Option<String> {
        self.entries.shift_remove(bundle_id)
    }

    /// Minimum version required of `bundle_id`
    pub fn required_version(&self, bundle_id: &str) -> Option<&str> {
        self.entries.get(bundle_id).map(String::as_str)
    }

    pub fn contains(&self, bundle_id: &str) -> bool {
        self.entries.contains_key(bundle_id)
    }

    /// Iterate `(bundle_id, required_version)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove requirements for bundles that are no longer present.
    ///
    /// Returns the pruned bundle ids in their previous order.
    pub fn prune_stale<'a, I>(&mut self, known_bundles: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let known: HashSet<&str> = known_bundles.into_iter().collect();
        let stale: Vec<String> = self
            .entries
            .keys()
            .filter(|id| !known.contains(id.as_str()))
            .cloned()
            .collect();

        for id in &stale {
            self.entries.shift_remove(id);
            info!(bundle = %id, "Pruned stale dependency");
        }

        stale
    }
}

impl<I: Into<String>, V: Into<String>> FromIterator<(I, V)> for DependencyRequirements {
    fn from_iter<T: IntoIterator<Item = (I, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(id, version)| (id.into(), version.into()))
                .collect(),
        }
    }
}
