use super::metric_key::MetricKey;
use std::collections::{BTreeMap, BTreeSet};

/// Normalized output of one ingestion cycle: a partial mapping from metric key to value.
///
/// A `None` value is a gap. Keys inserted through [`Tick::insert_custom`] are registered
/// by the store as user defined metrics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tick {
    values: BTreeMap<MetricKey, Option<f64>>,
    custom: BTreeSet<MetricKey>,
}

impl Tick {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<MetricKey>, value: f64) {
        self.values.insert(key.into(), Some(value));
    }

    pub fn insert_custom(&mut self, key: impl Into<MetricKey>, value: f64) {
        let key = key.into();
        self.custom.insert(key.clone());
        self.values.insert(key, Some(value));
    }

    /// A tick mapping every given key to a gap.
    pub fn gaps<'a>(keys: impl IntoIterator<Item = &'a MetricKey>) -> Self {
        Self {
            values: keys.into_iter().map(|key| (key.clone(), None)).collect(),
            custom: BTreeSet::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Option<f64>> {
        self.values.get(key).copied()
    }

    pub fn is_custom(&self, key: &str) -> bool {
        self.custom.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MetricKey, Option<f64>)> {
        self.values.iter().map(|(key, value)| (key, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
