//! Derating stress-limit tree
//!
//! A nested mapping `family → subcategory → style... → stress kind → [limit
//! per environment]`. Branch keys are looked up strictly: an absent
//! subcategory or style is a lookup error, never a silent zero.

use crate::error::{select, AnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

const BUILTIN_LIMITS: &str = include_str!("stress_limits.yaml");

/// One node of the stress-limit tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LimitNode {
    /// Limit per derating environment, protected first
    Limits(Vec<f64>),
    Group(BTreeMap<String, LimitNode>),
}

/// Stress limits for every component family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct StressLimits {
    families: BTreeMap<String, LimitNode>,
}

impl StressLimits {
    /// The default NSWC/Reliability Toolkit derating table
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_LIMITS)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_norway::from_str(content)?)
    }

    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(|k| k.as_str())
    }

    /// Resolve a branch (family/subcategory/style) to its group of stress kinds.
    pub fn group(&self, path: &[&str]) -> Result<&BTreeMap<String, LimitNode>> {
        let mut current = &self.families;
        let mut walked = String::from("stress_limits");
        for key in path {
            match current.get(*key) {
                Some(LimitNode::Group(children)) => current = children,
                Some(LimitNode::Limits(_)) | None => {
                    return Err(AnalysisError::lookup(walked, key));
                }
            }
            walked.push('.');
            walked.push_str(key);
        }
        Ok(current)
    }

    /// Limit for one stress kind under `path`, or `None` when the style
    /// does not derate that kind.
    pub fn limit(&self, path: &[&str], kind: &str, environment_id: i64) -> Result<Option<f64>> {
        let group = self.group(path)?;
        match group.get(kind) {
            None => Ok(None),
            Some(LimitNode::Limits(values)) => {
                let table = format!("stress_limits.{}.{}", path.join("."), kind);
                select(values, environment_id, &table).map(Some)
            }
            Some(LimitNode::Group(_)) => Err(AnalysisError::lookup(path.join("."), kind)),
        }
    }

    /// Like [`StressLimits::limit`] but the stress kind must exist
    pub fn require(&self, path: &[&str], kind: &str, environment_id: i64) -> Result<f64> {
        self.limit(path, kind, environment_id)?
            .ok_or_else(|| AnalysisError::lookup(path.join("."), kind))
    }

    /// Stable fingerprint of the table contents
    pub fn fingerprint(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let digest = Sha256::digest(canonical.as_bytes());
        Ok(hex::encode(digest))
    }
}
