//! Feature Map and Vector Assembly

use crate::schema::FeatureSchema;
use serde::Serialize;
use std::collections::HashMap;

/// Working name-to-value mapping built during encoding
#[derive(Debug, Clone, Default)]
pub struct FeatureMap {
    values: HashMap<String, f64>,
}

impl FeatureMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a feature, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Value if the feature was produced
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Lookup with fallback: features that were never produced read as 0
    pub fn value_or_default(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(0.0)
    }

    /// Whether the feature was produced
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Produced feature names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of produced features
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was produced yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// What the projection onto the schema had to paper over
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EncodingReport {
    /// Selected one-hot columns the schema does not know
    pub unmatched_categories: Vec<String>,
    /// Non one-hot schema columns that were filled with 0
    pub defaulted_columns: Vec<String>,
    /// Produced features the schema does not ask for
    pub dropped_features: Vec<String>,
}

impl EncodingReport {
    /// True when every selection matched and every column was produced
    pub fn is_clean(&self) -> bool {
        self.unmatched_categories.is_empty() && self.defaulted_columns.is_empty()
    }

    /// Human-readable notes for the caller
    pub fn warnings(&self) -> Vec<String> {
        let unmatched = self
            .unmatched_categories
            .iter()
            .map(|c| format!("selected option '{c}' is not a model column; it contributes nothing"));
        let defaulted = self
            .defaulted_columns
            .iter()
            .map(|c| format!("model column '{c}' is not produced from the form; using 0"));
        unmatched.chain(defaulted).collect()
    }
}

/// Numeric model input in schema order
#[derive(Debug, Clone, Serialize)]
pub struct FeatureVector {
    /// Values, one per schema column
    pub values: Vec<f64>,
    /// Column order the values follow
    #[serde(skip)]
    pub schema: FeatureSchema,
    /// Gaps filled during projection
    pub report: EncodingReport,
}

impl FeatureVector {
    /// Value of a named column
    pub fn get(&self, column: &str) -> Option<f64> {
        self.schema
            .index_of(column)
            .and_then(|i| self.values.get(i).copied())
    }

    /// Values as a slice in schema order
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of values (equals the schema length)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column and value pairs in schema order
    pub fn named(&self) -> impl Iterator<Item = (&str, f64)> {
        self.schema.iter().zip(self.values.iter().copied())
    }
}
