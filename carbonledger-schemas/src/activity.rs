use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw activity quantities keyed by category name, as supplied by the data
/// entry layer. The record is a dumb carrier: quantity validation and
/// factor lookup happen in the calculation core, and the record is never
/// mutated by a calculation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityRecord {
    quantities: BTreeMap<String, f64>,
}

impl ActivityRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quantity(mut self, category: impl Into<String>, quantity: f64) -> Self {
        self.quantities.insert(category.into(), quantity);
        self
    }

    pub fn set_quantity(&mut self, category: impl Into<String>, quantity: f64) {
        self.quantities.insert(category.into(), quantity);
    }

    pub fn quantity(&self, category: &str) -> Option<f64> {
        self.quantities.get(category).copied()
    }

    /// Iterates category/quantity pairs in category order, so downstream
    /// reports are stable from run to run.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.quantities.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }
}

impl FromIterator<(String, f64)> for ActivityRecord {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            quantities: iter.into_iter().collect(),
        }
    }
}
