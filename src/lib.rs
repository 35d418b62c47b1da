//! # Simcheck - Simulation Model Validation
//!
//! Simcheck is a rule-based validation engine for discrete-event process
//! simulation models. A model is a directed graph of activities fed by
//! generators and joined by probability-weighted connectors; activities
//! process entities through operation steps that may hold finite-capacity
//! resources. Simcheck checks a model's structural integrity before it is
//! handed to a simulation run.
//!
//! ## Features
//!
//! - **Rule-based Validation**: Connectivity, capacity, probability, and
//!   resource-contention checks as independent, ordered rules
//! - **Structured Diagnostics**: Every finding is an error, warning, or
//!   info message pointing at the offending element
//! - **Fail-soft**: An internal failure in one rule never hides the
//!   findings collected before it
//! - **Caching**: A structural hash short-circuits validation of
//!   unchanged models
//! - **Extensible**: Add custom checks through the `ValidationRule` trait
//!
//! ## Quick Start
//!
//! ```rust
//! use simcheck::prelude::*;
//!
//! // Assemble a small model
//! let mut model = ModelDefinition::new("assembly line");
//! let prep = model.add_activity(Activity::new("Prep").with_step(
//!     OperationStep::new(SimDuration::constant(2.0, PeriodUnit::Minutes)),
//! ));
//! let pack = model.add_activity(Activity::new("Pack"));
//! model.connect(prep, pack).unwrap();
//!
//! let part = model.add_entity(Entity::new("part"));
//! model.add_generator(Generator::new(prep, part));
//!
//! // Validate
//! let mut service = ModelValidationService::new();
//! let report = service.validate(&model);
//!
//! for message in report.iter() {
//!     println!("[{}] {}", message.severity, message.text);
//! }
//! assert!(report.can_convert());
//! ```
//!
//! ## Architecture
//!
//! The library is organized into three modules:
//!
//! - [`core`]: Element identifiers, error types, and domain value types
//! - [`model`]: The `ModelDefinition` aggregate and its element records
//! - [`validation`]: Messages, the derived model view, the rules, and
//!   the caching service
//!
//! ## Writing Custom Rules
//!
//! Implement the [`ValidationRule`] trait to add checks:
//!
//! ```rust
//! use simcheck::prelude::*;
//!
//! struct NamePrefixRule;
//!
//! impl ValidationRule for NamePrefixRule {
//!     fn name(&self) -> &str {
//!         "NamePrefixRule"
//!     }
//!
//!     fn validate(
//!         &self,
//!         state: &ModelDefinitionState,
//!         _config: &ValidationConfig,
//!         messages: &mut Vec<ValidationMessage>,
//!     ) -> Result<(), RuleError> {
//!         for activity in state.model().activities() {
//!             if activity.name.starts_with(' ') {
//!                 messages.push(ValidationMessage::missing_name(
//!                     ElementKind::Activity,
//!                     activity.id,
//!                 ));
//!             }
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut service = ModelValidationService::new();
//! service.add_rule(Box::new(NamePrefixRule));
//! ```
//!
//! [`ValidationRule`]: crate::validation::rules::ValidationRule

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod model;
pub mod validation;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust
/// use simcheck::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::error::{
        ElementId, ModelError, ModelResult, RuleError, SimcheckError, SimcheckResult,
    };
    pub use crate::core::types::{
        ConnectType, Distribution, DistributionKind, DurationKind, ElementKind, PeriodUnit,
        RequestMode, ResourceSetRequest, SimDuration,
    };

    // Model
    pub use crate::model::definition::ModelDefinition;
    pub use crate::model::elements::{
        Activity, Connector, Entity, Generator, ModelInfo, OperationStep, Resource,
    };

    // Validation
    pub use crate::validation::config::ValidationConfig;
    pub use crate::validation::messages::{
        Direction, Severity, ValidationMessage, ValidationReport, ValidationSummary,
    };
    pub use crate::validation::rules::{
        ActivityValidation, ConnectorValidation, ElementCountsValidation, EntityValidation,
        GeneratorValidation, ResourceValidation, ValidationRule,
    };
    pub use crate::validation::service::{default_rules, model_hash, ModelValidationService};
    pub use crate::validation::state::{ModelDefinitionState, ResourceUse};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
