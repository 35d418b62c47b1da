//! The validation service: orchestration and result caching.
//!
//! The service owns the rule list and a single-slot cache keyed by a
//! structural hash of the model. Validating an unchanged model returns
//! the cached report without re-running any rule. The hash covers every
//! field that can influence a message; a stale hit would silently
//! return outdated diagnostics, so nothing observable is excluded.

use crate::core::error::ElementId;
use crate::core::types::{ResourceSetRequest, SimDuration};
use crate::model::definition::ModelDefinition;
use crate::model::elements::{Activity, Connector, Entity, Generator, Resource};
use crate::validation::config::ValidationConfig;
use crate::validation::messages::{ValidationMessage, ValidationReport};
use crate::validation::rules::{
    ActivityValidation, ConnectorValidation, ElementCountsValidation, EntityValidation,
    GeneratorValidation, ResourceValidation, ValidationRule,
};
use crate::validation::state::ModelDefinitionState;
use log::{debug, trace};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::mem::discriminant;

/// The default rule list, in the fixed invocation order.
pub fn default_rules() -> Vec<Box<dyn ValidationRule>> {
    vec![
        Box::new(ElementCountsValidation),
        Box::new(ActivityValidation),
        Box::new(ConnectorValidation),
        Box::new(GeneratorValidation),
        Box::new(ResourceValidation),
        Box::new(EntityValidation),
    ]
}

/// The cached outcome of the most recent pass.
struct CachedRun {
    hash: u64,
    report: ValidationReport,
}

/// Validates model definitions, caching the most recent result.
///
/// The service is single-owner: `validate` takes `&mut self` and callers
/// serialize their calls (debounce rapid edits before validating).
pub struct ModelValidationService {
    config: ValidationConfig,
    rules: Vec<Box<dyn ValidationRule>>,
    cache: Option<CachedRun>,
}

impl ModelValidationService {
    /// Create a service with the default config and rule list.
    pub fn new() -> Self {
        Self::with_config(ValidationConfig::default())
    }

    /// Create a service with a custom config and the default rule list.
    pub fn with_config(config: ValidationConfig) -> Self {
        Self {
            config,
            rules: default_rules(),
            cache: None,
        }
    }

    /// Create a service with a custom rule list.
    pub fn with_rules(config: ValidationConfig, rules: Vec<Box<dyn ValidationRule>>) -> Self {
        Self {
            config,
            rules,
            cache: None,
        }
    }

    /// Append a rule to the end of the invocation order.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// The active configuration.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Drop the cached result, forcing the next call to recompute.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Validate a model, returning the cached report when the model is
    /// structurally unchanged since the last call.
    ///
    /// Never fails: an internal failure in a rule is converted into a
    /// single error message and the findings collected before it are
    /// kept (fail-soft).
    pub fn validate(&mut self, model: &ModelDefinition) -> ValidationReport {
        let hash = model_hash(model);

        if let Some(cached) = &self.cache {
            if cached.hash == hash {
                debug!("validation cache hit for model {}", model.model.id);
                return cached.report.clone();
            }
        }
        debug!("validation cache miss for model {}", model.model.id);

        let state = ModelDefinitionState::build(model);
        let mut messages = Vec::new();

        for rule in &self.rules {
            let before = messages.len();
            match rule.validate(&state, &self.config, &mut messages) {
                Ok(()) => {
                    trace!(
                        "rule {} appended {} message(s)",
                        rule.name(),
                        messages.len() - before
                    );
                }
                Err(error) => {
                    debug!("rule {} failed, cutting the pass short: {}", rule.name(), error);
                    messages.push(ValidationMessage::internal_failure(&error));
                    break;
                }
            }
        }

        let mut report = ValidationReport::new();
        report.extend(messages);

        self.cache = Some(CachedRun {
            hash,
            report: report.clone(),
        });
        report
    }
}

impl Default for ModelValidationService {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Structural hashing
// ============================================================================

/// Compute the structural hash of a model.
///
/// Deterministic across calls for an unchanged model: collections are
/// hashed in id-sorted order and floats by their bit patterns.
pub fn model_hash(model: &ModelDefinition) -> u64 {
    let mut hasher = DefaultHasher::new();

    hash_id(model.model.id, &mut hasher);
    model.model.name.hash(&mut hasher);
    model.model.description.hash(&mut hasher);

    let mut activities: Vec<&Activity> = model.activities().collect();
    activities.sort_by_key(|a| a.id);
    activities.len().hash(&mut hasher);
    for activity in activities {
        hash_activity(activity, &mut hasher);
    }

    let mut connectors: Vec<&Connector> = model.connectors().collect();
    connectors.sort_by_key(|c| c.id);
    connectors.len().hash(&mut hasher);
    for connector in connectors {
        hash_connector(connector, &mut hasher);
    }

    let mut resources: Vec<&Resource> = model.resources().collect();
    resources.sort_by_key(|r| r.id);
    resources.len().hash(&mut hasher);
    for resource in resources {
        hash_resource(resource, &mut hasher);
    }

    let mut generators: Vec<&Generator> = model.generators().collect();
    generators.sort_by_key(|g| g.id);
    generators.len().hash(&mut hasher);
    for generator in generators {
        hash_generator(generator, &mut hasher);
    }

    let mut entities: Vec<&Entity> = model.entities().collect();
    entities.sort_by_key(|e| e.id);
    entities.len().hash(&mut hasher);
    for entity in entities {
        hash_entity(entity, &mut hasher);
    }

    hasher.finish()
}

fn hash_id<H: Hasher>(id: ElementId, hasher: &mut H) {
    id.0.as_bytes().hash(hasher);
}

fn hash_f64<H: Hasher>(value: f64, hasher: &mut H) {
    value.to_bits().hash(hasher);
}

fn hash_duration<H: Hasher>(duration: &SimDuration, hasher: &mut H) {
    hash_f64(duration.length, hasher);
    discriminant(&duration.unit).hash(hasher);
    discriminant(&duration.kind).hash(hasher);
    duration.distribution.is_some().hash(hasher);
    if let Some(dist) = &duration.distribution {
        discriminant(&dist.kind).hash(hasher);
        hash_f64(dist.mean, hasher);
        hash_f64(dist.spread, hasher);
    }
}

fn hash_request<H: Hasher>(request: &ResourceSetRequest, hasher: &mut H) {
    discriminant(request).hash(hasher);
    match request {
        ResourceSetRequest::Single {
            resource_id,
            quantity,
        } => {
            hash_id(*resource_id, hasher);
            quantity.hash(hasher);
        }
        ResourceSetRequest::Set { mode, requests } => {
            discriminant(mode).hash(hasher);
            requests.len().hash(hasher);
            for child in requests {
                hash_request(child, hasher);
            }
        }
    }
}

fn hash_activity<H: Hasher>(activity: &Activity, hasher: &mut H) {
    hash_id(activity.id, hasher);
    activity.name.hash(hasher);
    activity.capacity.hash(hasher);
    activity.input_buffer_capacity.hash(hasher);
    activity.output_buffer_capacity.hash(hasher);
    activity.operation_steps.len().hash(hasher);
    for step in &activity.operation_steps {
        step.requirement.is_some().hash(hasher);
        if let Some(requirement) = &step.requirement {
            hash_request(requirement, hasher);
        }
        hash_duration(&step.duration, hasher);
    }
}

fn hash_connector<H: Hasher>(connector: &Connector, hasher: &mut H) {
    hash_id(connector.id, hasher);
    connector.name.hash(hasher);
    hash_id(connector.source_id, hasher);
    hash_id(connector.target_id, hasher);
    hash_f64(connector.probability, hasher);
    discriminant(&connector.connect_type).hash(hasher);
}

fn hash_resource<H: Hasher>(resource: &Resource, hasher: &mut H) {
    hash_id(resource.id, hasher);
    resource.name.hash(hasher);
    resource.capacity.hash(hasher);
}

fn hash_generator<H: Hasher>(generator: &Generator, hasher: &mut H) {
    hash_id(generator.id, hasher);
    generator.name.hash(hasher);
    hash_id(generator.activity_key_id, hasher);
    hash_id(generator.entity_id, hasher);
    hash_f64(generator.periodic_occurrences, hasher);
    hash_f64(generator.entities_per_creation, hasher);
    hash_f64(generator.max_entities, hasher);
    hash_duration(&generator.period_interval_duration, hasher);
    hash_duration(&generator.periodic_start_duration, hasher);
}

fn hash_entity<H: Hasher>(entity: &Entity, hasher: &mut H) {
    hash_id(entity.id, hasher);
    entity.name.hash(hasher);
}
