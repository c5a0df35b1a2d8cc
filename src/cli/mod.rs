//! CLI command implementations
//!
//! This module contains all CLI command handlers, organized by category:
//! - `predict`: Hazard rate prediction and dormancy
//! - `derate`: Derating checks
//! - `analysis`: Allocation, criticality, growth, bounds and fitting
//! - `tables`: Lookup tables and schemas
//! - `util`: Shared utility functions

pub mod analysis;
pub mod derate;
pub mod predict;
pub mod tables;
pub mod util;

// Re-export all command functions for convenient access
pub use analysis::{cmd_allocate, cmd_bounds, cmd_criticality, cmd_fit, cmd_growth};
pub use derate::cmd_derate;
pub use predict::{cmd_dormancy, cmd_predict};
pub use tables::{cmd_schema, cmd_tables};
