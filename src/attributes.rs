//! Attribute-map boundary
//!
//! The persistence layer hands the engine loose attribute mappings. This
//! module turns one into a typed input struct. A missing required key is a
//! lookup error and a value of the wrong JSON type is a type error; nothing
//! is coerced.

use crate::error::{AnalysisError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Convert an attribute mapping into a typed input
pub fn from_attributes<T: DeserializeOwned>(attributes: Value) -> Result<T> {
    serde_json::from_value(attributes).map_err(classify)
}

/// Parse YAML or JSON text into a typed input
pub fn from_text<T: DeserializeOwned>(content: &str) -> Result<T> {
    let value: Value = if content.trim_start().starts_with('{') {
        serde_json::from_str(content)?
    } else {
        serde_norway::from_str(content)?
    };
    from_attributes(value)
}

/// Merge computed fields into an attribute mapping.
///
/// Existing keys are overwritten, never removed.
pub fn merge_into<T: Serialize>(attributes: &mut Value, computed: &T) -> Result<()> {
    let computed = serde_json::to_value(computed)?;
    match (attributes, computed) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                target.insert(key, value);
            }
            Ok(())
        }
        _ => Err(AnalysisError::Type(
            "attributes must be a mapping".to_string(),
        )),
    }
}

fn classify(err: serde_json::Error) -> AnalysisError {
    let message = err.to_string();
    if let Some(rest) = message.strip_prefix("missing field ") {
        let key = rest
            .split('`')
            .nth(1)
            .unwrap_or(rest)
            .to_string();
        return AnalysisError::lookup("attributes", key);
    }
    if message.starts_with("invalid type") || message.starts_with("invalid value") {
        return AnalysisError::Type(message);
    }
    AnalysisError::Json(err)
}
