//! Record trait and filter types for stored collections

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A field value that records expose for filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexValue {
    String(String),
    Integer(i64),
}

impl std::fmt::Display for IndexValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", s),
            Self::Integer(i) => write!(f, "{}", i),
        }
    }
}

/// Comparison operator for list filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
}

/// A single condition applied during `Store::list`
#[derive(Debug, Clone)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: IndexValue,
}

impl Filter {
    /// Whether the given field set satisfies this filter
    pub fn matches(&self, fields: &HashMap<String, IndexValue>) -> bool {
        match self.op {
            FilterOp::Eq => fields.get(&self.field) == Some(&self.value),
        }
    }
}

/// Implemented by every type persisted in a store collection
pub trait Record: Serialize + DeserializeOwned + Clone + Send + 'static {
    /// Unique record ID within the collection
    fn id(&self) -> &str;

    /// Last modification timestamp (unix ms)
    fn updated_at(&self) -> i64;

    /// Name of the collection this type is stored in
    fn collection_name() -> &'static str;

    /// Fields this record can be filtered by
    fn indexed_fields(&self) -> HashMap<String, IndexValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_string_eq() {
        let mut fields = HashMap::new();
        fields.insert("trip".to_string(), IndexValue::String("abc123-trip".to_string()));

        let filter = Filter {
            field: "trip".to_string(),
            op: FilterOp::Eq,
            value: IndexValue::String("abc123-trip".to_string()),
        };
        assert!(filter.matches(&fields));

        let miss = Filter {
            field: "trip".to_string(),
            op: FilterOp::Eq,
            value: IndexValue::String("other-trip".to_string()),
        };
        assert!(!miss.matches(&fields));
    }

    #[test]
    fn test_filter_missing_field_never_matches() {
        let fields = HashMap::new();
        let filter = Filter {
            field: "trip".to_string(),
            op: FilterOp::Eq,
            value: IndexValue::String("anything".to_string()),
        };
        assert!(!filter.matches(&fields));
    }

    #[test]
    fn test_index_value_display() {
        assert_eq!(IndexValue::String("x".to_string()).to_string(), "x");
        assert_eq!(IndexValue::Integer(42).to_string(), "42");
    }
}
