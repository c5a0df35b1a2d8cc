//! Error types for the analysis engine

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Analysis errors
///
/// The first six variants are the calculation taxonomy: every analysis
/// function surfaces exactly one of them to its caller. The remaining
/// variants belong to the configuration and CLI boundary.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Unknown category, subcategory, type, style or application key.
    #[error("Lookup error: no entry for {key} in {table}")]
    Lookup { table: String, key: String },

    /// A 1-based index (environment, quality, ...) outside its table.
    #[error("Index error: {index} is not a valid index into {table}")]
    Index { table: String, index: i64 },

    /// An input outside its valid domain. Never clamped.
    #[error("Range error: {field} = {value} is outside the valid range {bound}")]
    Range {
        field: String,
        value: f64,
        bound: String,
    },

    /// Wrong attribute type (e.g. a string where a number is required).
    #[error("Type error: {0}")]
    Type(String),

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Rejected or malformed user-defined equation.
    #[error("Equation error: {0}")]
    Equation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl AnalysisError {
    pub fn lookup(table: impl Into<String>, key: impl std::fmt::Display) -> Self {
        AnalysisError::Lookup {
            table: table.into(),
            key: key.to_string(),
        }
    }

    pub fn index(table: impl Into<String>, index: i64) -> Self {
        AnalysisError::Index {
            table: table.into(),
            index,
        }
    }

    pub fn range(field: impl Into<String>, value: f64, bound: impl Into<String>) -> Self {
        AnalysisError::Range {
            field: field.into(),
            value,
            bound: bound.into(),
        }
    }

    /// Name of the offending field for range errors
    pub fn field(&self) -> Option<&str> {
        match self {
            AnalysisError::Range { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<&str> for AnalysisError {
    fn from(s: &str) -> Self {
        AnalysisError::Other(s.to_string())
    }
}

impl From<String> for AnalysisError {
    fn from(s: String) -> Self {
        AnalysisError::Other(s)
    }
}

/// Fetch `table[id - 1]` for a 1-based categorical id.
pub(crate) fn select<T: Copy>(table: &[T], id: i64, name: &str) -> Result<T> {
    if id < 1 {
        return Err(AnalysisError::index(name, id));
    }
    table
        .get((id - 1) as usize)
        .copied()
        .ok_or_else(|| AnalysisError::index(name, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_is_one_based() {
        let table = [1.0, 2.0, 3.0];
        assert_eq!(select(&table, 1, "t").unwrap(), 1.0);
        assert_eq!(select(&table, 3, "t").unwrap(), 3.0);
    }

    #[test]
    fn test_select_out_of_range() {
        let table = [1.0, 2.0, 3.0];
        assert!(matches!(
            select(&table, 0, "t"),
            Err(AnalysisError::Index { index: 0, .. })
        ));
        assert!(matches!(
            select(&table, 4, "t"),
            Err(AnalysisError::Index { index: 4, .. })
        ));
    }

    #[test]
    fn test_range_error_names_field() {
        let err = AnalysisError::range("rpn_severity", 11.0, "[1, 10]");
        assert_eq!(err.field(), Some("rpn_severity"));
        assert!(err.to_string().contains("rpn_severity"));
    }
}
