//! Validation rules.
//!
//! Each rule checks one category of findings. Rules are stateless and
//! independent of each other; a rule only appends messages and never
//! fails on malformed model input (malformed elements become messages).
//! The service runs them in a fixed order, so message order is
//! deterministic for a given model.

use crate::core::error::{ElementId, RuleError};
use crate::core::types::{ConnectType, ElementKind};
use crate::validation::config::ValidationConfig;
use crate::validation::messages::{Direction, ValidationMessage};
use crate::validation::state::ModelDefinitionState;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet, VecDeque};

/// Trait for validation rules.
pub trait ValidationRule: Send + Sync {
    /// Name of this rule, used in diagnostics for internal failures.
    fn name(&self) -> &str;

    /// Validate the model view, appending findings to `messages`.
    ///
    /// `Err` is reserved for internal failures; the service converts it
    /// into a single diagnostic and keeps the messages appended so far.
    fn validate(
        &self,
        state: &ModelDefinitionState,
        config: &ValidationConfig,
        messages: &mut Vec<ValidationMessage>,
    ) -> Result<(), RuleError>;
}

/// Checks presence of required and expected top-level element kinds.
///
/// A model with no activities is unusable and gets an error. Missing
/// generators or connectors usually mean the model is still under
/// construction, so those are warnings.
pub struct ElementCountsValidation;

impl ValidationRule for ElementCountsValidation {
    fn name(&self) -> &str {
        "ElementCountsValidation"
    }

    fn validate(
        &self,
        state: &ModelDefinitionState,
        _config: &ValidationConfig,
        messages: &mut Vec<ValidationMessage>,
    ) -> Result<(), RuleError> {
        let model = state.model();

        if model.activity_count() == 0 {
            messages.push(ValidationMessage::missing_required_element(
                ElementKind::Activity,
            ));
        }
        if model.generator_count() == 0 {
            messages.push(ValidationMessage::no_elements(ElementKind::Generator));
        }
        if model.connector_count() == 0 {
            messages.push(ValidationMessage::no_elements(ElementKind::Connector));
        }

        Ok(())
    }
}

/// Per-activity checks: connectivity, naming, capacities, buffers, and
/// operation step durations.
pub struct ActivityValidation;

impl ValidationRule for ActivityValidation {
    fn name(&self) -> &str {
        "ActivityValidation"
    }

    fn validate(
        &self,
        state: &ModelDefinitionState,
        config: &ValidationConfig,
        messages: &mut Vec<ValidationMessage>,
    ) -> Result<(), RuleError> {
        for activity in state.model().activities() {
            if state.outgoing(activity.id).is_empty() {
                messages.push(ValidationMessage::no_connections(
                    activity.id,
                    Direction::Outgoing,
                ));
            }
            if state.incoming(activity.id).is_empty() && !state.is_generator_target(activity.id) {
                messages.push(ValidationMessage::no_connections(
                    activity.id,
                    Direction::Incoming,
                ));
            }

            if activity.name.is_empty() {
                messages.push(ValidationMessage::missing_name(
                    ElementKind::Activity,
                    activity.id,
                ));
            }
            if activity.capacity <= 0 {
                messages.push(ValidationMessage::invalid_capacity(
                    ElementKind::Activity,
                    activity.id,
                    activity.capacity,
                ));
            }

            for (which, capacity) in [
                ("input", activity.input_buffer_capacity),
                ("output", activity.output_buffer_capacity),
            ] {
                if capacity < 0 {
                    messages.push(ValidationMessage::invalid_buffer_capacity(
                        activity.id,
                        which,
                        capacity,
                    ));
                } else if capacity > config.large_buffer_threshold {
                    messages.push(ValidationMessage::large_buffer_capacity(
                        activity.id,
                        which,
                        capacity,
                        config.large_buffer_threshold,
                    ));
                }
            }

            if activity.operation_steps.is_empty() {
                messages.push(ValidationMessage::no_operation_steps(activity.id));
            }
            for (step_index, step) in activity.operation_steps.iter().enumerate() {
                let length = step.duration.length;
                if length < 0.0 {
                    messages.push(ValidationMessage::invalid_step_duration(
                        activity.id,
                        step_index,
                        length,
                    ));
                } else if length > config.long_duration_threshold {
                    messages.push(ValidationMessage::unusual_step_duration(
                        activity.id,
                        step_index,
                        length,
                        config.long_duration_threshold,
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Per-connector checks: endpoint resolution, probability ranges, the
/// per-source probability sum, and connector cycles.
pub struct ConnectorValidation;

impl ValidationRule for ConnectorValidation {
    fn name(&self) -> &str {
        "ConnectorValidation"
    }

    fn validate(
        &self,
        state: &ModelDefinitionState,
        config: &ValidationConfig,
        messages: &mut Vec<ValidationMessage>,
    ) -> Result<(), RuleError> {
        let model = state.model();

        for connector in model.connectors() {
            if !state.node_exists(connector.source_id) {
                messages.push(ValidationMessage::invalid_connection(
                    ElementKind::Connector,
                    connector.id,
                    "source",
                    connector.source_id,
                ));
            }
            if !state.node_exists(connector.target_id) {
                messages.push(ValidationMessage::invalid_connection(
                    ElementKind::Connector,
                    connector.id,
                    "target",
                    connector.target_id,
                ));
            }

            if connector.probability.is_nan()
                || connector.probability < 0.0
                || connector.probability > 1.0
            {
                messages.push(ValidationMessage::invalid_probability(
                    connector.id,
                    connector.probability,
                ));
            }
        }

        // Per-source probability mass, Probability connectors only.
        // First-seen source order keeps the output deterministic.
        let mut sums: IndexMap<ElementId, f64> = IndexMap::new();
        for connector in model.connectors() {
            if connector.connect_type == ConnectType::Probability
                && connector.probability.is_finite()
            {
                *sums.entry(connector.source_id).or_insert(0.0) += connector.probability;
            }
        }
        for (source_id, sum) in sums {
            if sum > 1.0 + config.probability_epsilon {
                messages.push(ValidationMessage::probability_sum_exceeded(
                    source_id,
                    sum - 1.0,
                ));
            }
        }

        if let Some(cycle_nodes) = find_cycle_nodes(state) {
            messages.push(ValidationMessage::cycle_detected(&cycle_nodes));
        }

        Ok(())
    }
}

/// Kahn's algorithm over the connector graph; the nodes left with a
/// nonzero in-degree are exactly the cycle participants. Connectors
/// with dangling endpoints are excluded (they are reported separately).
fn find_cycle_nodes(state: &ModelDefinitionState) -> Option<Vec<ElementId>> {
    let model = state.model();

    let mut in_degree: HashMap<ElementId, usize> = HashMap::new();
    let mut adjacency: HashMap<ElementId, Vec<ElementId>> = HashMap::new();
    for node_id in model.node_ids() {
        in_degree.insert(node_id, 0);
        adjacency.insert(node_id, Vec::new());
    }

    for connector in model.connectors() {
        if state.node_exists(connector.source_id) && state.node_exists(connector.target_id) {
            adjacency
                .get_mut(&connector.source_id)
                .expect("initialized above")
                .push(connector.target_id);
            *in_degree
                .get_mut(&connector.target_id)
                .expect("initialized above") += 1;
        }
    }

    let mut queue: VecDeque<ElementId> = model
        .node_ids()
        .filter(|id| in_degree[id] == 0)
        .collect();

    let mut visited = 0usize;
    while let Some(node) = queue.pop_front() {
        visited += 1;
        for &neighbor in &adjacency[&node] {
            let degree = in_degree.get_mut(&neighbor).expect("initialized above");
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(neighbor);
            }
        }
    }

    if visited == in_degree.len() {
        return None;
    }

    // Model iteration order, so the message is stable across runs.
    let remaining: Vec<ElementId> = model
        .node_ids()
        .filter(|id| in_degree[id] > 0)
        .collect();
    Some(remaining)
}

/// Per-generator checks: target resolution and creation bounds.
pub struct GeneratorValidation;

impl ValidationRule for GeneratorValidation {
    fn name(&self) -> &str {
        "GeneratorValidation"
    }

    fn validate(
        &self,
        state: &ModelDefinitionState,
        _config: &ValidationConfig,
        messages: &mut Vec<ValidationMessage>,
    ) -> Result<(), RuleError> {
        let model = state.model();

        for generator in model.generators() {
            if !model.has_activity(generator.activity_key_id) {
                messages.push(ValidationMessage::invalid_connection(
                    ElementKind::Generator,
                    generator.id,
                    "activity",
                    generator.activity_key_id,
                ));
            }
            if !model.has_entity(generator.entity_id) {
                messages.push(ValidationMessage::invalid_connection(
                    ElementKind::Generator,
                    generator.id,
                    "entity",
                    generator.entity_id,
                ));
            }

            // `f64::INFINITY` is the distinguished unbounded value and
            // passes the positivity check; NaN and non-positives fail it.
            for (category, value) in [
                ("periodic occurrences", generator.periodic_occurrences),
                ("entities per creation", generator.entities_per_creation),
                ("max entities", generator.max_entities),
            ] {
                if value.is_nan() || value <= 0.0 {
                    messages.push(ValidationMessage::generator_bound(
                        generator.id,
                        category,
                        value,
                    ));
                }
            }

            for (category, duration) in [
                ("period interval duration", &generator.period_interval_duration),
                ("periodic start duration", &generator.periodic_start_duration),
            ] {
                if duration.length < 0.0 {
                    messages.push(ValidationMessage::generator_bound(
                        generator.id,
                        category,
                        duration.length,
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Resource checks: capacities, request quantities, duplicate requests
/// within one step, and structural over-demand.
pub struct ResourceValidation;

impl ValidationRule for ResourceValidation {
    fn name(&self) -> &str {
        "ResourceValidation"
    }

    fn validate(
        &self,
        state: &ModelDefinitionState,
        _config: &ValidationConfig,
        messages: &mut Vec<ValidationMessage>,
    ) -> Result<(), RuleError> {
        let model = state.model();

        for resource in model.resources() {
            if resource.capacity <= 0 {
                messages.push(ValidationMessage::invalid_capacity(
                    ElementKind::Resource,
                    resource.id,
                    resource.capacity,
                ));
            }
        }

        // Walk each step's request tree for leaf-level findings. The
        // duplicate check spans the whole tree of one step, including
        // leaves buried in nested groups.
        for activity in model.activities() {
            for (step_index, step) in activity.operation_steps.iter().enumerate() {
                let Some(requirement) = &step.requirement else {
                    continue;
                };

                let mut seen: HashSet<ElementId> = HashSet::new();
                let mut reported: HashSet<ElementId> = HashSet::new();
                for (resource_id, quantity) in requirement.leaves() {
                    if !model.has_resource(resource_id) {
                        messages.push(ValidationMessage::unknown_resource(
                            activity.id,
                            step_index,
                            resource_id,
                        ));
                    }
                    if quantity <= 0 {
                        messages.push(ValidationMessage::invalid_resource_quantity(
                            activity.id,
                            step_index,
                            resource_id,
                            quantity,
                        ));
                    }
                    if !seen.insert(resource_id) && reported.insert(resource_id) {
                        messages.push(ValidationMessage::duplicate_resource_request(
                            activity.id,
                            step_index,
                            resource_id,
                        ));
                    }
                }
            }
        }

        // Structural contention. Activities connected by a directed
        // path (either way) can hold the resource at overlapping
        // simulated time; summed demand past capacity is flagged. This
        // is a static over-approximation, not a runtime guarantee.
        for resource in model.resources() {
            if resource.capacity <= 0 {
                continue;
            }

            let mut per_activity: IndexMap<ElementId, i64> = IndexMap::new();
            for usage in state.resource_uses(resource.id) {
                if usage.quantity > 0 {
                    *per_activity.entry(usage.activity_id).or_insert(0) += usage.quantity;
                }
            }
            if per_activity.len() < 2 {
                continue;
            }

            let activity_ids: Vec<ElementId> = per_activity.keys().copied().collect();
            let demand: i64 = activity_ids
                .iter()
                .filter(|&&a| {
                    activity_ids.iter().any(|&b| {
                        a != b && (state.is_reachable(a, b) || state.is_reachable(b, a))
                    })
                })
                .map(|a| per_activity[a])
                .sum();

            if demand > resource.capacity {
                messages.push(ValidationMessage::resource_capacity_exceeded(
                    resource.id,
                    demand,
                    resource.capacity,
                ));
            }
        }

        Ok(())
    }
}

/// Per-entity checks: naming and whether any generator creates the kind.
pub struct EntityValidation;

impl ValidationRule for EntityValidation {
    fn name(&self) -> &str {
        "EntityValidation"
    }

    fn validate(
        &self,
        state: &ModelDefinitionState,
        _config: &ValidationConfig,
        messages: &mut Vec<ValidationMessage>,
    ) -> Result<(), RuleError> {
        let model = state.model();

        let referenced: HashSet<ElementId> = model
            .generators()
            .map(|generator| generator.entity_id)
            .collect();

        for entity in model.entities() {
            if entity.name.is_empty() {
                messages.push(ValidationMessage::missing_name(
                    ElementKind::Entity,
                    entity.id,
                ));
            }
            if !referenced.contains(&entity.id) {
                messages.push(ValidationMessage::unused_entity(entity.id));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PeriodUnit, ResourceSetRequest, SimDuration};
    use crate::model::definition::ModelDefinition;
    use crate::model::elements::{Activity, Connector, Entity, Generator, OperationStep, Resource};
    use crate::validation::messages::Severity;

    fn run_rule(rule: &dyn ValidationRule, model: &ModelDefinition) -> Vec<ValidationMessage> {
        let state = ModelDefinitionState::build(model);
        let config = ValidationConfig::default();
        let mut messages = Vec::new();
        rule.validate(&state, &config, &mut messages).unwrap();
        messages
    }

    fn minute_step() -> OperationStep {
        OperationStep::new(SimDuration::constant(1.0, PeriodUnit::Minutes))
    }

    #[test]
    fn test_element_counts_empty_model() {
        let model = ModelDefinition::new("empty");
        let messages = run_rule(&ElementCountsValidation, &model);

        let errors: Vec<_> = messages
            .iter()
            .filter(|m| m.severity == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].text.contains("Activity"));

        let warnings = messages
            .iter()
            .filter(|m| m.severity == Severity::Warning)
            .count();
        assert_eq!(warnings, 2);
    }

    #[test]
    fn test_element_counts_populated_model() {
        let mut model = ModelDefinition::new("full");
        let a = model.add_activity(Activity::new("A"));
        let b = model.add_activity(Activity::new("B"));
        model.connect(a, b).unwrap();
        let entity = model.add_entity(Entity::new("part"));
        model.add_generator(Generator::new(a, entity));

        assert!(run_rule(&ElementCountsValidation, &model).is_empty());
    }

    #[test]
    fn test_activity_connectivity_warnings() {
        let mut model = ModelDefinition::new("test");
        let a = model.add_activity(Activity::new("A").with_step(minute_step()));
        let b = model.add_activity(Activity::new("B").with_step(minute_step()));
        model.connect(a, b).unwrap();

        let messages = run_rule(&ActivityValidation, &model);

        // A has no incoming, B has no outgoing.
        let a_msgs: Vec<_> = messages
            .iter()
            .filter(|m| m.element_id == Some(a))
            .collect();
        assert_eq!(a_msgs.len(), 1);
        assert!(a_msgs[0].text.contains("incoming"));

        let b_msgs: Vec<_> = messages
            .iter()
            .filter(|m| m.element_id == Some(b))
            .collect();
        assert_eq!(b_msgs.len(), 1);
        assert!(b_msgs[0].text.contains("outgoing"));
    }

    #[test]
    fn test_generator_target_suppresses_incoming_warning() {
        let mut model = ModelDefinition::new("test");
        let a = model.add_activity(Activity::new("A").with_step(minute_step()));
        let b = model.add_activity(Activity::new("B").with_step(minute_step()));
        model.connect(a, b).unwrap();
        let entity = model.add_entity(Entity::new("part"));
        model.add_generator(Generator::new(a, entity));

        let messages = run_rule(&ActivityValidation, &model);
        assert!(messages
            .iter()
            .all(|m| !(m.element_id == Some(a) && m.text.contains("incoming"))));
    }

    #[test]
    fn test_activity_data_checks() {
        let mut model = ModelDefinition::new("test");
        let a = model.add_activity(
            Activity::new("")
                .with_capacity(0)
                .with_buffers(-1, 20_000)
                .with_step(OperationStep::new(SimDuration::constant(
                    -2.0,
                    PeriodUnit::Minutes,
                )))
                .with_step(OperationStep::new(SimDuration::constant(
                    200_000.0,
                    PeriodUnit::Minutes,
                ))),
        );

        let messages = run_rule(&ActivityValidation, &model);
        let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();

        assert!(texts.iter().any(|t| t.contains("has no name")));
        assert!(texts.iter().any(|t| t.contains("invalid capacity 0")));
        assert!(texts.iter().any(|t| t.contains("negative input buffer")));
        assert!(texts
            .iter()
            .any(|t| t.contains("unusually large output buffer")));
        assert!(texts.iter().any(|t| t.contains("negative duration")));
        assert!(texts.iter().any(|t| t.contains("unusually long duration")));
        assert!(messages.iter().all(|m| m.element_id == Some(a)));
    }

    #[test]
    fn test_empty_steps_is_warning_only() {
        let mut model = ModelDefinition::new("test");
        model.add_activity(Activity::new("A"));

        let messages = run_rule(&ActivityValidation, &model);
        let step_msgs: Vec<_> = messages
            .iter()
            .filter(|m| m.text.contains("operation steps"))
            .collect();
        assert_eq!(step_msgs.len(), 1);
        assert_eq!(step_msgs[0].severity, Severity::Warning);
    }

    #[test]
    fn test_dangling_connector_target() {
        let mut model = ModelDefinition::new("test");
        let a = model.add_activity(Activity::new("A"));
        let connector_id = model.add_connector(Connector::new(a, ElementId::new()));

        let messages = run_rule(&ConnectorValidation, &model);
        let dangling: Vec<_> = messages
            .iter()
            .filter(|m| m.text.contains("unknown target"))
            .collect();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].severity, Severity::Error);
        assert_eq!(dangling[0].element_id, Some(connector_id));
    }

    #[test]
    fn test_probability_out_of_range() {
        let mut model = ModelDefinition::new("test");
        let a = model.add_activity(Activity::new("A"));
        let b = model.add_activity(Activity::new("B"));
        model.add_connector(Connector::new(a, b).with_probability(1.5));

        let messages = run_rule(&ConnectorValidation, &model);
        assert!(messages
            .iter()
            .any(|m| m.text.contains("outside [0, 1]") && m.severity == Severity::Error));
    }

    #[test]
    fn test_probability_sum_within_tolerance() {
        let mut model = ModelDefinition::new("test");
        let a = model.add_activity(Activity::new("A"));
        let b = model.add_activity(Activity::new("B"));
        let c = model.add_activity(Activity::new("C"));
        model.add_connector(Connector::new(a, b).with_probability(0.5));
        model.add_connector(Connector::new(a, c).with_probability(0.500_000_1));

        let messages = run_rule(&ConnectorValidation, &model);
        assert!(messages.iter().all(|m| !m.text.contains("sum")));
    }

    #[test]
    fn test_probability_sum_exceeded() {
        let mut model = ModelDefinition::new("test");
        let a = model.add_activity(Activity::new("A"));
        let b = model.add_activity(Activity::new("B"));
        let c = model.add_activity(Activity::new("C"));
        model.add_connector(Connector::new(a, b).with_probability(0.6));
        model.add_connector(Connector::new(a, c).with_probability(0.5));

        let messages = run_rule(&ConnectorValidation, &model);
        let violations: Vec<_> = messages.iter().filter(|m| m.text.contains("sum")).collect();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].element_id, Some(a));
    }

    #[test]
    fn test_conditional_connectors_excluded_from_sum() {
        let mut model = ModelDefinition::new("test");
        let a = model.add_activity(Activity::new("A"));
        let b = model.add_activity(Activity::new("B"));
        model.add_connector(
            Connector::new(a, b)
                .with_probability(1.0)
                .with_connect_type(ConnectType::Conditional),
        );
        model.add_connector(Connector::new(a, b).with_probability(1.0));

        let messages = run_rule(&ConnectorValidation, &model);
        assert!(messages.iter().all(|m| !m.text.contains("sum")));
    }

    #[test]
    fn test_cycle_reported_as_info() {
        let mut model = ModelDefinition::new("test");
        let a = model.add_activity(Activity::new("A"));
        let b = model.add_activity(Activity::new("B"));
        let c = model.add_activity(Activity::new("C"));
        model.connect(a, b).unwrap();
        model.connect(b, c).unwrap();
        model.connect(c, a).unwrap();

        let messages = run_rule(&ConnectorValidation, &model);
        let cycles: Vec<_> = messages.iter().filter(|m| m.text.contains("cycle")).collect();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].severity, Severity::Info);
    }

    #[test]
    fn test_acyclic_graph_no_cycle_message() {
        let mut model = ModelDefinition::new("test");
        let a = model.add_activity(Activity::new("A"));
        let b = model.add_activity(Activity::new("B"));
        model.connect(a, b).unwrap();

        let messages = run_rule(&ConnectorValidation, &model);
        assert!(messages.iter().all(|m| !m.text.contains("cycle")));
    }

    #[test]
    fn test_generator_dangling_references() {
        let mut model = ModelDefinition::new("test");
        let generator_id =
            model.add_generator(Generator::new(ElementId::new(), ElementId::new()));

        let messages = run_rule(&GeneratorValidation, &model);
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.severity == Severity::Error));
        assert!(messages.iter().all(|m| m.element_id == Some(generator_id)));
    }

    #[test]
    fn test_generator_bounds() {
        let mut model = ModelDefinition::new("test");
        let a = model.add_activity(Activity::new("A"));
        let entity = model.add_entity(Entity::new("part"));

        // Unbounded is valid.
        model.add_generator(
            Generator::new(a, entity).with_bounds(f64::INFINITY, 1.0, f64::INFINITY),
        );
        assert!(run_rule(&GeneratorValidation, &model).is_empty());

        // Zero and negative are not.
        let bad = model.add_generator(Generator::new(a, entity).with_bounds(0.0, -2.0, 5.0));
        let messages = run_rule(&GeneratorValidation, &model);
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.element_id == Some(bad)));
    }

    #[test]
    fn test_generator_nan_bound_is_invalid() {
        let mut model = ModelDefinition::new("test");
        let a = model.add_activity(Activity::new("A"));
        let entity = model.add_entity(Entity::new("part"));
        model.add_generator(Generator::new(a, entity).with_bounds(f64::NAN, 1.0, 1.0));

        let messages = run_rule(&GeneratorValidation, &model);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].text.contains("periodic occurrences"));
    }

    #[test]
    fn test_generator_negative_interval() {
        let mut model = ModelDefinition::new("test");
        let a = model.add_activity(Activity::new("A"));
        let entity = model.add_entity(Entity::new("part"));
        model.add_generator(
            Generator::new(a, entity)
                .with_interval(SimDuration::constant(-1.0, PeriodUnit::Minutes)),
        );

        let messages = run_rule(&GeneratorValidation, &model);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].text.contains("period interval duration"));
    }

    #[test]
    fn test_resource_capacity_and_quantity() {
        let mut model = ModelDefinition::new("test");
        let broken = model.add_resource(Resource::new("broken", 0));
        let fine = model.add_resource(Resource::new("fine", 2));
        model.add_activity(
            Activity::new("A")
                .with_step(minute_step().with_requirement(ResourceSetRequest::single(fine, -1))),
        );

        let messages = run_rule(&ResourceValidation, &model);
        assert!(messages
            .iter()
            .any(|m| m.element_id == Some(broken) && m.text.contains("invalid capacity")));
        assert!(messages
            .iter()
            .any(|m| m.text.contains("invalid quantity -1")));
    }

    #[test]
    fn test_unknown_resource_reported() {
        let mut model = ModelDefinition::new("test");
        let ghost = ElementId::new();
        let a = model.add_activity(
            Activity::new("A")
                .with_step(minute_step().with_requirement(ResourceSetRequest::single(ghost, 1))),
        );

        let messages = run_rule(&ResourceValidation, &model);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity, Severity::Error);
        assert_eq!(messages[0].element_id, Some(a));
        assert!(messages[0].text.contains(&ghost.to_string()));
    }

    #[test]
    fn test_duplicate_request_in_nested_tree() {
        let mut model = ModelDefinition::new("test");
        let operator = model.add_resource(Resource::new("operator", 5));
        model.add_activity(Activity::new("A").with_step(
            minute_step().with_requirement(ResourceSetRequest::all(vec![
                ResourceSetRequest::single(operator, 1),
                ResourceSetRequest::any(vec![ResourceSetRequest::single(operator, 2)]),
            ])),
        ));

        let messages = run_rule(&ResourceValidation, &model);
        let duplicates: Vec<_> = messages
            .iter()
            .filter(|m| m.text.contains("more than once"))
            .collect();
        assert_eq!(duplicates.len(), 1);
    }

    #[test]
    fn test_same_resource_across_steps_not_duplicate() {
        let mut model = ModelDefinition::new("test");
        let operator = model.add_resource(Resource::new("operator", 5));
        model.add_activity(
            Activity::new("A")
                .with_step(
                    minute_step().with_requirement(ResourceSetRequest::single(operator, 1)),
                )
                .with_step(
                    minute_step().with_requirement(ResourceSetRequest::single(operator, 1)),
                ),
        );

        let messages = run_rule(&ResourceValidation, &model);
        assert!(messages.iter().all(|m| !m.text.contains("more than once")));
    }

    #[test]
    fn test_contention_on_connected_activities() {
        let mut model = ModelDefinition::new("test");
        let operator = model.add_resource(Resource::new("operator", 1));
        let a = model.add_activity(
            Activity::new("A")
                .with_step(minute_step().with_requirement(ResourceSetRequest::single(operator, 1))),
        );
        let b = model.add_activity(
            Activity::new("B")
                .with_step(minute_step().with_requirement(ResourceSetRequest::single(operator, 1))),
        );
        model.connect(a, b).unwrap();

        let messages = run_rule(&ResourceValidation, &model);
        let over: Vec<_> = messages
            .iter()
            .filter(|m| m.text.contains("over-demanded"))
            .collect();
        assert_eq!(over.len(), 1);
        assert_eq!(over[0].severity, Severity::Warning);
        assert_eq!(over[0].element_id, Some(operator));
    }

    #[test]
    fn test_no_contention_for_disconnected_activities() {
        let mut model = ModelDefinition::new("test");
        let operator = model.add_resource(Resource::new("operator", 1));
        model.add_activity(
            Activity::new("A")
                .with_step(minute_step().with_requirement(ResourceSetRequest::single(operator, 1))),
        );
        model.add_activity(
            Activity::new("B")
                .with_step(minute_step().with_requirement(ResourceSetRequest::single(operator, 1))),
        );

        let messages = run_rule(&ResourceValidation, &model);
        assert!(messages.iter().all(|m| !m.text.contains("over-demanded")));
    }

    #[test]
    fn test_no_contention_when_capacity_suffices() {
        let mut model = ModelDefinition::new("test");
        let operator = model.add_resource(Resource::new("operator", 2));
        let a = model.add_activity(
            Activity::new("A")
                .with_step(minute_step().with_requirement(ResourceSetRequest::single(operator, 1))),
        );
        let b = model.add_activity(
            Activity::new("B")
                .with_step(minute_step().with_requirement(ResourceSetRequest::single(operator, 1))),
        );
        model.connect(a, b).unwrap();

        let messages = run_rule(&ResourceValidation, &model);
        assert!(messages.iter().all(|m| !m.text.contains("over-demanded")));
    }

    #[test]
    fn test_entity_checks() {
        let mut model = ModelDefinition::new("test");
        let a = model.add_activity(Activity::new("A"));
        let used = model.add_entity(Entity::new("part"));
        let unnamed = model.add_entity(Entity::new(""));
        model.add_generator(Generator::new(a, used));

        let messages = run_rule(&EntityValidation, &model);
        assert!(messages
            .iter()
            .any(|m| m.element_id == Some(unnamed) && m.text.contains("has no name")));
        assert!(messages
            .iter()
            .any(|m| m.element_id == Some(unnamed)
                && m.text.contains("not created")
                && m.severity == Severity::Info));
        assert!(messages.iter().all(|m| m.element_id != Some(used)));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn probability_sum_flagged_iff_outside_tolerance(
                p1 in 0.0f64..1.0,
                p2 in 0.0f64..1.0,
            ) {
                let mut model = ModelDefinition::new("prop");
                let a = model.add_activity(Activity::new("A"));
                let b = model.add_activity(Activity::new("B"));
                let c = model.add_activity(Activity::new("C"));
                model.add_connector(Connector::new(a, b).with_probability(p1));
                model.add_connector(Connector::new(a, c).with_probability(p2));

                let messages = run_rule(&ConnectorValidation, &model);
                let violations = messages.iter().filter(|m| m.text.contains("sum")).count();

                let expected = if p1 + p2 > 1.0 + 1e-6 { 1 } else { 0 };
                prop_assert_eq!(violations, expected);
            }
        }
    }
}
