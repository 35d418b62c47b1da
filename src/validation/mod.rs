//! Validation module for simulation model checking.
//!
//! The validation service runs before a model is handed off, to catch
//! structural problems early.

pub mod config;
pub mod messages;
pub mod rules;
pub mod service;
pub mod state;

pub use config::ValidationConfig;
pub use messages::{Direction, Severity, ValidationMessage, ValidationReport, ValidationSummary};
pub use rules::{
    ActivityValidation, ConnectorValidation, ElementCountsValidation, EntityValidation,
    GeneratorValidation, ResourceValidation, ValidationRule,
};
pub use service::{default_rules, model_hash, ModelValidationService};
pub use state::{ModelDefinitionState, ResourceUse};
