// src/domain/features.rs

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

/// One house's full feature vector, keyed by column name.
///
/// One-hot encoded categoricals are stored as sibling columns sharing a
/// prefix (e.g. `CentralAir_Y`). At most one column of such a group is `1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureRow(BTreeMap<String, f64>);

impl FeatureRow {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, f64> {
        self.0.iter()
    }

    /// Columns belonging to the one-hot group `group` (prefix match).
    pub fn group_columns<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .keys()
            .filter(move |k| k.starts_with(group))
            .map(String::as_str)
    }

    /// Keys present in exactly one of the two rows, sorted.
    pub fn schema_difference(&self, other: &FeatureRow) -> Vec<String> {
        let mine: BTreeSet<&String> = self.0.keys().collect();
        let theirs: BTreeSet<&String> = other.0.keys().collect();
        mine.symmetric_difference(&theirs)
            .map(|k| k.to_string())
            .collect()
    }
}

impl FromIterator<(String, f64)> for FeatureRow {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FeatureRow {
    type Item = (&'a String, &'a f64);
    type IntoIter = btree_map::Iter<'a, String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Returns a copy of `row` where the one-hot group `group` selects `category`.
///
/// Every column starting with `group` is zeroed, then `group + category` is
/// set to `1` if it is one of those columns. A category without a column
/// (the dropped reference level) leaves the whole group at `0`. Rows that
/// don't carry the group at all come back unchanged.
pub fn encode(row: &FeatureRow, group: &str, category: &str) -> FeatureRow {
    let target = format!("{group}{category}");
    let mut encoded = row.clone();

    for (name, value) in encoded.0.iter_mut() {
        if name.starts_with(group) {
            *value = if *name == target { 1.0 } else { 0.0 };
        }
    }

    encoded
}
