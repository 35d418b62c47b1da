//! Derived, read-only view of a model used by the validation rules.
//!
//! The state precomputes what every rule would otherwise re-derive:
//! connector adjacency per node, the set of generator-fed activities,
//! and an index of where each resource is requested. Building it is a
//! cheap pure derivation over the model snapshot; it never mutates the
//! model and is rebuilt on every non-cached validation pass.

use crate::core::error::ElementId;
use crate::model::definition::ModelDefinition;
use crate::model::elements::Connector;
use std::collections::{HashMap, HashSet, VecDeque};

/// One occurrence of a resource request, located by activity and step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceUse {
    /// Activity whose step requests the resource.
    pub activity_id: ElementId,
    /// Index of the step within the activity.
    pub step_index: usize,
    /// Requested quantity.
    pub quantity: i64,
}

/// Read-only validation view over a [`ModelDefinition`].
pub struct ModelDefinitionState<'a> {
    model: &'a ModelDefinition,
    incoming: HashMap<ElementId, Vec<&'a Connector>>,
    outgoing: HashMap<ElementId, Vec<&'a Connector>>,
    generator_targets: HashSet<ElementId>,
    resource_uses: HashMap<ElementId, Vec<ResourceUse>>,
}

impl<'a> ModelDefinitionState<'a> {
    /// Build the state view for a model.
    pub fn build(model: &'a ModelDefinition) -> Self {
        let mut incoming: HashMap<ElementId, Vec<&'a Connector>> = HashMap::new();
        let mut outgoing: HashMap<ElementId, Vec<&'a Connector>> = HashMap::new();

        for connector in model.connectors() {
            outgoing
                .entry(connector.source_id)
                .or_default()
                .push(connector);
            incoming
                .entry(connector.target_id)
                .or_default()
                .push(connector);
        }

        let generator_targets = model
            .generators()
            .map(|generator| generator.activity_key_id)
            .collect();

        let mut resource_uses: HashMap<ElementId, Vec<ResourceUse>> = HashMap::new();
        for activity in model.activities() {
            for (step_index, step) in activity.operation_steps.iter().enumerate() {
                if let Some(requirement) = &step.requirement {
                    for (resource_id, quantity) in requirement.leaves() {
                        resource_uses.entry(resource_id).or_default().push(
                            ResourceUse {
                                activity_id: activity.id,
                                step_index,
                                quantity,
                            },
                        );
                    }
                }
            }
        }

        log::trace!(
            "built state view: {} nodes with outgoing connectors, {} resources in use",
            outgoing.len(),
            resource_uses.len()
        );

        Self {
            model,
            incoming,
            outgoing,
            generator_targets,
            resource_uses,
        }
    }

    /// The underlying model.
    pub fn model(&self) -> &ModelDefinition {
        self.model
    }

    /// Connectors arriving at a node.
    pub fn incoming(&self, node_id: ElementId) -> &[&'a Connector] {
        self.incoming
            .get(&node_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Connectors leaving a node.
    pub fn outgoing(&self, node_id: ElementId) -> &[&'a Connector] {
        self.outgoing
            .get(&node_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any generator feeds the given activity.
    pub fn is_generator_target(&self, activity_id: ElementId) -> bool {
        self.generator_targets.contains(&activity_id)
    }

    /// Whether an id resolves to an activity or a generator.
    pub fn node_exists(&self, id: ElementId) -> bool {
        self.model.has_node(id)
    }

    /// Where a resource is requested, in model iteration order.
    pub fn resource_uses(&self, resource_id: ElementId) -> &[ResourceUse] {
        self.resource_uses
            .get(&resource_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check if `target` is reachable from `start` following connectors.
    pub fn is_reachable(&self, start: ElementId, target: ElementId) -> bool {
        if start == target {
            return true;
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if current == target {
                return true;
            }

            if visited.insert(current) {
                for connector in self.outgoing(current) {
                    queue.push_back(connector.target_id);
                }
            }
        }

        false
    }
}
