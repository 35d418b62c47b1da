//! Model module for simulation model definitions.
//!
//! A model definition is a directed graph of activities and generators
//! joined by probability-weighted connectors, plus the resources and
//! entity kinds the model uses.

pub mod definition;
pub mod elements;

// Re-export commonly used types
pub use definition::ModelDefinition;
pub use elements::{Activity, Connector, Entity, Generator, ModelInfo, OperationStep, Resource};
