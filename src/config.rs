//! Engine configuration
//!
//! Loaded from `ramstk.yaml`. Every field is optional apart from `version`;
//! an absent file means the built-in tables and default equation bounds.

use crate::equation::EquationLimits;
use crate::error::{AnalysisError, Result};
use crate::tables::{DormancyTable, StressLimits};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file name looked up in a directory
pub const CONFIG_FILE: &str = "ramstk.yaml";

/// Engine configuration (`ramstk.yaml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EngineConfig {
    /// Schema version for migrations
    pub version: u32,

    /// Stress-limit table replacing the built-in one, relative to this file
    #[serde(default)]
    pub stress_limits: Option<PathBuf>,

    /// Dormancy multiplier rows replacing the built-in table
    #[serde(default)]
    pub dormancy: Option<DormancyTable>,

    /// Bounds on user-defined criticality equations
    #[serde(default)]
    pub equation: EquationLimits,

    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: 1,
            stress_limits: None,
            dormancy: None,
            equation: EquationLimits::default(),
            base_dir: None,
        }
    }
}

impl EngineConfig {
    /// Load `ramstk.yaml` from a directory
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_file = dir.join(CONFIG_FILE);
        if !config_file.exists() {
            tracing::debug!(dir = %dir.display(), "no {} found", CONFIG_FILE);
            return Ok(None);
        }
        Self::load(&config_file).map(Some)
    }

    /// Load a configuration file by path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: EngineConfig = serde_norway::from_str(&content).map_err(|e| {
            AnalysisError::Other(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        if config.version != 1 {
            return Err(AnalysisError::Other(format!(
                "Unsupported {} version: {}",
                CONFIG_FILE, config.version
            )));
        }

        config.base_dir = path.parent().map(Path::to_path_buf);
        tracing::info!(path = %path.display(), "loaded engine configuration");
        Ok(config)
    }

    /// The configured stress-limit table, or the built-in one
    pub fn stress_limits(&self) -> Result<StressLimits> {
        let Some(relative) = &self.stress_limits else {
            return StressLimits::builtin();
        };
        let path = match &self.base_dir {
            Some(base) if relative.is_relative() => base.join(relative),
            _ => relative.clone(),
        };
        let content = std::fs::read_to_string(&path).map_err(|e| {
            AnalysisError::Other(format!(
                "Failed to read stress limits {}: {}",
                path.display(),
                e
            ))
        })?;
        let limits = StressLimits::from_yaml(&content)?;
        tracing::info!(path = %path.display(), "using stress-limit override");
        Ok(limits)
    }

    /// The configured dormancy table, or the built-in one
    pub fn dormancy(&self) -> DormancyTable {
        match &self.dormancy {
            Some(table) => {
                tracing::debug!("using dormancy table override");
                table.clone()
            }
            None => DormancyTable::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: EngineConfig = serde_norway::from_str("version: 1\n").unwrap();
        assert_eq!(config.equation, EquationLimits::default());
        assert!(config.stress_limits.is_none());
        assert_eq!(config.dormancy(), DormancyTable::builtin());
    }

    #[test]
    fn test_partial_equation_bounds() {
        let config: EngineConfig =
            serde_norway::from_str("version: 1\nequation:\n  max_depth: 8\n").unwrap();
        assert_eq!(config.equation.max_depth, 8);
        assert_eq!(config.equation.max_length, 512);
    }

    #[test]
    fn test_missing_dir_is_none() {
        let dir = std::env::temp_dir().join("ramstk-engine-no-such-dir");
        assert!(EngineConfig::load_from_dir(&dir).unwrap().is_none());
    }
}
