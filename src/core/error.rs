//! Error types and element identifiers.
//!
//! Uses thiserror for structured errors with context. Model errors carry
//! the offending element id so callers can point at the exact record.
//! Validation findings are not errors: they are [`ValidationMessage`]
//! values produced by the validation rules and never abort a pass.
//!
//! [`ValidationMessage`]: crate::validation::messages::ValidationMessage

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for an element in a model definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub Uuid);

impl ElementId {
    /// Create a new random element ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an element ID from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Top-level error type for simcheck.
///
/// This enum encompasses all error categories and enables automatic
/// conversion between specific error types.
#[derive(Error, Debug)]
pub enum SimcheckError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors related to model structure and assembly operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ModelError {
    #[error("Element {0} not found")]
    ElementNotFound(ElementId),

    #[error("Element {0} already exists in the model")]
    DuplicateElement(ElementId),

    #[error("Invalid connection: {reason}")]
    InvalidConnection { reason: String },

    #[error("Model is empty")]
    EmptyModel,
}

/// Failure raised out of a validation rule's evaluation.
///
/// Rules never fail on malformed model input (malformed elements become
/// messages); this type exists for the service's fail-soft boundary,
/// where an unexpected internal failure in one rule is converted into a
/// single diagnostic message instead of losing the whole pass.
#[derive(Error, Debug, Clone)]
#[error("rule '{rule}' failed: {detail}")]
pub struct RuleError {
    /// Name of the rule that failed.
    pub rule: String,
    /// Description of the failure.
    pub detail: String,
}

impl RuleError {
    /// Create a new rule error.
    pub fn new(rule: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            detail: detail.into(),
        }
    }
}

/// Result type alias for simcheck operations.
pub type SimcheckResult<T> = Result<T, SimcheckError>;

/// Result type alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
