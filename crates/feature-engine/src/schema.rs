//! Feature Schema

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Columns derived from the prediction target; never valid model inputs
const TARGET_DERIVED_COLUMNS: &[&str] = &["rpm"];

/// Errors while building a schema from a model artifact
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("feature schema has no columns")]
    Empty,
    #[error("feature schema column {index} has an empty name")]
    BlankColumn { index: usize },
    #[error("feature schema lists column '{0}' more than once")]
    DuplicateColumn(String),
    #[error("feature schema contains target-derived column '{0}'")]
    TargetDerived(String),
}

#[derive(Debug)]
struct SchemaInner {
    columns: Vec<String>,
    lookup: HashSet<String>,
}

/// Ordered list of column names a trained model expects.
///
/// Validated once on construction and shared read-only afterwards; cloning
/// only bumps a reference count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema {
    inner: Arc<SchemaInner>,
}

impl FeatureSchema {
    /// Build a schema, rejecting empty, duplicate or target-derived columns
    pub fn new<I, S>(columns: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut lookup = HashSet::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            if column.trim().is_empty() {
                return Err(SchemaError::BlankColumn { index });
            }
            if TARGET_DERIVED_COLUMNS
                .iter()
                .any(|t| column.eq_ignore_ascii_case(t))
            {
                return Err(SchemaError::TargetDerived(column.clone()));
            }
            if !lookup.insert(column.clone()) {
                return Err(SchemaError::DuplicateColumn(column.clone()));
            }
        }

        Ok(Self {
            inner: Arc::new(SchemaInner { columns, lookup }),
        })
    }

    /// Column names in model order
    pub fn columns(&self) -> &[String] {
        &self.inner.columns
    }

    /// Iterate column names in model order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.inner.columns.iter().map(String::as_str)
    }

    /// Whether the model expects this exact column
    pub fn contains(&self, column: &str) -> bool {
        self.inner.lookup.contains(column)
    }

    /// Position of a column in model order
    pub fn index_of(&self, column: &str) -> Option<usize> {
        if !self.contains(column) {
            return None;
        }
        self.inner.columns.iter().position(|c| c == column)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.inner.columns.len()
    }

    /// Always false for a constructed schema
    pub fn is_empty(&self) -> bool {
        self.inner.columns.is_empty()
    }
}

impl PartialEq for FeatureSchema {
    fn eq(&self, other: &Self) -> bool {
        self.inner.columns == other.inner.columns
    }
}

impl TryFrom<Vec<String>> for FeatureSchema {
    type Error = SchemaError;

    fn try_from(columns: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(schema: FeatureSchema) -> Self {
        schema.inner.columns.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_order() {
        let schema = FeatureSchema::new(["likes", "views", "category_Tech"]).unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.index_of("views"), Some(1));
        assert_eq!(schema.index_of("comments"), None);
        assert!(schema.contains("category_Tech"));
        assert_eq!(schema.iter().collect::<Vec<_>>(), vec!["likes", "views", "category_Tech"]);
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(FeatureSchema::new(Vec::<String>::new()).unwrap_err(), SchemaError::Empty);
        assert_eq!(
            FeatureSchema::new(["views", " "]).unwrap_err(),
            SchemaError::BlankColumn { index: 1 }
        );
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = FeatureSchema::new(["views", "likes", "views"]).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateColumn("views".into()));
    }

    #[test]
    fn test_rejects_rpm_any_case() {
        for name in ["RPM", "rpm", "Rpm"] {
            let err = FeatureSchema::new(["views", name]).unwrap_err();
            assert_eq!(err, SchemaError::TargetDerived(name.into()));
        }
    }

    #[test]
    fn test_serde_as_plain_list() {
        let schema: FeatureSchema = serde_json::from_str(r#"["views","likes"]"#).unwrap();
        assert_eq!(schema.columns(), &["views".to_string(), "likes".to_string()]);
        assert_eq!(serde_json::to_string(&schema).unwrap(), r#"["views","likes"]"#);
        assert!(serde_json::from_str::<FeatureSchema>(r#"["RPM"]"#).is_err());
    }

    #[test]
    fn test_clone_shares_columns() {
        let schema = FeatureSchema::new(["views"]).unwrap();
        let copy = schema.clone();
        assert_eq!(schema, copy);
        assert!(Arc::ptr_eq(&schema.inner, &copy.inner));
    }
}
