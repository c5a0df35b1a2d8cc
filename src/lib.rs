// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # RAMSTK engine - reliability prediction and derating calculations
//!
//! Pure calculation functions for a RAMS workbench: MIL-HDBK-217F hazard
//! rates, stress derating, dormancy, FMEA criticality, goal allocation,
//! life-distribution statistics and reliability growth.
//!
//! ## Core Concept
//!
//! The engine holds no state. A caller (a database layer, the `ramstk`
//! binary, a test) hands each function typed inputs and the lookup tables
//! it needs, and gets back a value or an [`AnalysisError`]. Tables are
//! immutable values loaded once, from the built-in defaults or from
//! `ramstk.yaml`, and passed explicitly.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ramstk_engine::*;
//!
//! let input: PredictionInput = attributes::from_text(r#"
//!   category: resistor
//!   subcategory_id: 2
//!   environment_active_id: 3
//!   quality_id: 2
//!   specification_id: 1
//!   temperature_active: 45.0
//!   power_ratio: 0.3
//! "#)?;
//! let prediction = milhdbk217f::calculate(&input, Method::PartStress)?;
//! println!("λp = {}", prediction.hazard_rate_active);
//!
//! let limits = StressLimits::builtin()?;
//! let result = do_derating_analysis(1, &derating_input, &limits)?;
//! if result.overstress {
//!     print!("{}", result.reason);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                             │
//! │  ATTRIBUTES (JSON / YAML mapping)                           │
//! │       │                                                     │
//! │       ├──► milhdbk217f::calculate ──► Prediction            │
//! │       │         └──► dormancy ──► dormant hazard rate       │
//! │       │                                                     │
//! │       ├──► do_derating_analysis(env, limits) ──► Result     │
//! │       │                                                     │
//! │       ├──► criticality (RPN, HRI, equations) ──► numbers    │
//! │       │                                                     │
//! │       └──► do_allocate(parent, children) ──► Allocation     │
//! │                                                             │
//! │  SAMPLES (failure times, counts)                            │
//! │       │                                                     │
//! │       ├──► statistics::{weibull, normal, exponential}       │
//! │       │                                                     │
//! │       └──► growth::{duane, crow_amsaa, splan}               │
//! │                                                             │
//! │  TABLES (StressLimits, DormancyTable) ◄── EngineConfig      │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Errors
//!
//! | Variant | Raised for |
//! |---------|-----------|
//! | `Lookup` | unknown category, subcategory, type or text key |
//! | `Index` | 1-based id outside its table |
//! | `Range` | value outside its domain, naming the field |
//! | `Type` | wrong attribute type |
//! | `DegenerateInput` | a computation with no defined fallback |
//! | `Equation` | rejected user-defined equation |
//!
//! Documented fallbacks (a 0.0 dormancy multiplier, the Duane zero-failure
//! default, NaN for degenerate distribution parameters) are return values,
//! not errors.

// Core modules
pub mod attributes;
pub mod config;
pub mod error;
pub mod tables;

// Prediction and derating
pub mod derating;
pub mod dormancy;
pub mod milhdbk217f;

// FMEA and allocation
pub mod allocation;
pub mod criticality;
pub mod equation;

// Statistics and growth
pub mod growth;
pub mod statistics;

// Re-exports
pub use allocation::{
    do_allocate, AllocationChild, AllocationMethod, AllocationParent, AllocationResult,
    GoalMeasure, Goals,
};
pub use config::EngineConfig;
pub use criticality::{
    calculate_hri, calculate_item_criticality, calculate_mode_criticality,
    calculate_mode_hazard_rate, calculate_rpn, calculate_user_defined, UserDefinedInputs,
};
pub use derating::{do_derating_analysis, DeratingInput, DeratingResult};
pub use dormancy::calculate_dormant_hazard_rate;
pub use equation::{EquationLimits, Evaluator};
pub use error::{AnalysisError, Result};
pub use growth::{GrowthAssessment, GrowthModel, GrowthRequest, GrowthSample};
pub use milhdbk217f::{Adjustments, Method, Prediction, PredictionInput};
pub use statistics::{
    do_calculate_beta_bounds, do_calculate_fisher_information, BetaBounds, FitMethod, FitResult,
    GoodnessOfFit, LifeDistribution,
};
pub use tables::{DormancyTable, StressLimits};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
