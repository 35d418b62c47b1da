//! Core types for the simcheck validation engine.
//!
//! This module contains the foundational types shared by the model and
//! validation layers:
//! - Element identifiers and error types
//! - Domain value types (durations, connect types, resource request trees)

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{ElementId, ModelError, ModelResult, RuleError, SimcheckError, SimcheckResult};
pub use types::{
    ConnectType, Distribution, DistributionKind, DurationKind, ElementKind, PeriodUnit,
    RequestMode, ResourceSetRequest, SimDuration,
};
