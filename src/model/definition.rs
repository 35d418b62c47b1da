//! The model definition aggregate.
//!
//! A ModelDefinition owns one model element plus five keyed collections
//! of activities, connectors, resources, generators, and entities. It
//! uses a centralized approach for:
//! - Easy serialization
//! - Model-wide validation
//! - Stable, deterministic iteration order
//!
//! The validator treats a definition as a read-only snapshot; the
//! mutation API here is for the editing layer.

use crate::core::error::{ElementId, ModelError, ModelResult};
use crate::model::elements::{
    Activity, Connector, Entity, Generator, ModelInfo, Resource,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A complete simulation model: the model element plus its keyed
/// element collections.
///
/// Uses IndexMap to maintain insertion order for consistent iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// The model element.
    pub model: ModelInfo,
    activities: IndexMap<ElementId, Activity>,
    connectors: IndexMap<ElementId, Connector>,
    resources: IndexMap<ElementId, Resource>,
    generators: IndexMap<ElementId, Generator>,
    entities: IndexMap<ElementId, Entity>,
}

impl ModelDefinition {
    /// Create a new empty model definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            model: ModelInfo::new(name),
            activities: IndexMap::new(),
            connectors: IndexMap::new(),
            resources: IndexMap::new(),
            generators: IndexMap::new(),
            entities: IndexMap::new(),
        }
    }

    // ========================================================================
    // Activities
    // ========================================================================

    /// Add an activity and return its ID.
    pub fn add_activity(&mut self, activity: Activity) -> ElementId {
        let id = activity.id;
        self.activities.insert(id, activity);
        id
    }

    /// Get a reference to an activity.
    pub fn get_activity(&self, id: ElementId) -> ModelResult<&Activity> {
        self.activities
            .get(&id)
            .ok_or(ModelError::ElementNotFound(id))
    }

    /// Get a mutable reference to an activity.
    pub fn get_activity_mut(&mut self, id: ElementId) -> ModelResult<&mut Activity> {
        self.activities
            .get_mut(&id)
            .ok_or(ModelError::ElementNotFound(id))
    }

    /// Remove an activity.
    ///
    /// Also removes all connectors with an endpoint on this activity.
    pub fn remove_activity(&mut self, id: ElementId) -> ModelResult<Activity> {
        self.connectors
            .retain(|_, conn| conn.source_id != id && conn.target_id != id);
        self.activities
            .shift_remove(&id)
            .ok_or(ModelError::ElementNotFound(id))
    }

    /// Check if an activity exists.
    pub fn has_activity(&self, id: ElementId) -> bool {
        self.activities.contains_key(&id)
    }

    /// Get all activities in insertion order.
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.activities.values()
    }

    /// Get the number of activities.
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    // ========================================================================
    // Connectors
    // ========================================================================

    /// Add a connector and return its ID.
    ///
    /// The endpoints are not checked here: dangling references are the
    /// validator's job to report, never to drop silently.
    pub fn add_connector(&mut self, connector: Connector) -> ElementId {
        let id = connector.id;
        self.connectors.insert(id, connector);
        id
    }

    /// Create a connector between two existing nodes.
    ///
    /// Unlike [`add_connector`](Self::add_connector), this checks that
    /// both endpoints resolve, for callers assembling a model by hand.
    pub fn connect(&mut self, source: ElementId, target: ElementId) -> ModelResult<ElementId> {
        if !self.has_node(source) {
            return Err(ModelError::InvalidConnection {
                reason: format!("source {} is not an activity or generator", source),
            });
        }
        if !self.has_node(target) {
            return Err(ModelError::InvalidConnection {
                reason: format!("target {} is not an activity or generator", target),
            });
        }
        Ok(self.add_connector(Connector::new(source, target)))
    }

    /// Get a reference to a connector.
    pub fn get_connector(&self, id: ElementId) -> ModelResult<&Connector> {
        self.connectors
            .get(&id)
            .ok_or(ModelError::ElementNotFound(id))
    }

    /// Get a mutable reference to a connector.
    pub fn get_connector_mut(&mut self, id: ElementId) -> ModelResult<&mut Connector> {
        self.connectors
            .get_mut(&id)
            .ok_or(ModelError::ElementNotFound(id))
    }

    /// Remove a connector.
    pub fn remove_connector(&mut self, id: ElementId) -> ModelResult<Connector> {
        self.connectors
            .shift_remove(&id)
            .ok_or(ModelError::ElementNotFound(id))
    }

    /// Get all connectors in insertion order.
    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.values()
    }

    /// Get all connectors leaving a node.
    pub fn connectors_from(&self, node_id: ElementId) -> impl Iterator<Item = &Connector> {
        self.connectors
            .values()
            .filter(move |c| c.source_id == node_id)
    }

    /// Get all connectors arriving at a node.
    pub fn connectors_to(&self, node_id: ElementId) -> impl Iterator<Item = &Connector> {
        self.connectors
            .values()
            .filter(move |c| c.target_id == node_id)
    }

    /// Get the number of connectors.
    pub fn connector_count(&self) -> usize {
        self.connectors.len()
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// Add a resource and return its ID.
    pub fn add_resource(&mut self, resource: Resource) -> ElementId {
        let id = resource.id;
        self.resources.insert(id, resource);
        id
    }

    /// Get a reference to a resource.
    pub fn get_resource(&self, id: ElementId) -> ModelResult<&Resource> {
        self.resources
            .get(&id)
            .ok_or(ModelError::ElementNotFound(id))
    }

    /// Remove a resource.
    pub fn remove_resource(&mut self, id: ElementId) -> ModelResult<Resource> {
        self.resources
            .shift_remove(&id)
            .ok_or(ModelError::ElementNotFound(id))
    }

    /// Check if a resource exists.
    pub fn has_resource(&self, id: ElementId) -> bool {
        self.resources.contains_key(&id)
    }

    /// Get all resources in insertion order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    /// Get the number of resources.
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    // ========================================================================
    // Generators
    // ========================================================================

    /// Add a generator and return its ID.
    pub fn add_generator(&mut self, generator: Generator) -> ElementId {
        let id = generator.id;
        self.generators.insert(id, generator);
        id
    }

    /// Get a reference to a generator.
    pub fn get_generator(&self, id: ElementId) -> ModelResult<&Generator> {
        self.generators
            .get(&id)
            .ok_or(ModelError::ElementNotFound(id))
    }

    /// Get a mutable reference to a generator.
    pub fn get_generator_mut(&mut self, id: ElementId) -> ModelResult<&mut Generator> {
        self.generators
            .get_mut(&id)
            .ok_or(ModelError::ElementNotFound(id))
    }

    /// Remove a generator.
    ///
    /// Also removes all connectors with an endpoint on this generator.
    pub fn remove_generator(&mut self, id: ElementId) -> ModelResult<Generator> {
        self.connectors
            .retain(|_, conn| conn.source_id != id && conn.target_id != id);
        self.generators
            .shift_remove(&id)
            .ok_or(ModelError::ElementNotFound(id))
    }

    /// Check if a generator exists.
    pub fn has_generator(&self, id: ElementId) -> bool {
        self.generators.contains_key(&id)
    }

    /// Get all generators in insertion order.
    pub fn generators(&self) -> impl Iterator<Item = &Generator> {
        self.generators.values()
    }

    /// Get the number of generators.
    pub fn generator_count(&self) -> usize {
        self.generators.len()
    }

    // ========================================================================
    // Entities
    // ========================================================================

    /// Add an entity and return its ID.
    pub fn add_entity(&mut self, entity: Entity) -> ElementId {
        let id = entity.id;
        self.entities.insert(id, entity);
        id
    }

    /// Get a reference to an entity.
    pub fn get_entity(&self, id: ElementId) -> ModelResult<&Entity> {
        self.entities
            .get(&id)
            .ok_or(ModelError::ElementNotFound(id))
    }

    /// Remove an entity.
    pub fn remove_entity(&mut self, id: ElementId) -> ModelResult<Entity> {
        self.entities
            .shift_remove(&id)
            .ok_or(ModelError::ElementNotFound(id))
    }

    /// Check if an entity exists.
    pub fn has_entity(&self, id: ElementId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Get all entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Get the number of entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // ========================================================================
    // Model-wide queries
    // ========================================================================

    /// Check whether an id resolves to a connectable node
    /// (an activity or a generator).
    pub fn has_node(&self, id: ElementId) -> bool {
        self.has_activity(id) || self.has_generator(id)
    }

    /// All connectable node ids, activities first, in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.activities
            .keys()
            .chain(self.generators.keys())
            .copied()
    }

    /// Check if the model has no elements besides the model element.
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
            && self.connectors.is_empty()
            && self.resources.is_empty()
            && self.generators.is_empty()
            && self.entities.is_empty()
    }

    /// Clear all element collections.
    pub fn clear(&mut self) {
        self.activities.clear();
        self.connectors.clear();
        self.resources.clear();
        self.generators.clear();
        self.entities.clear();
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Serialize the model to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a model from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for ModelDefinition {
    fn default() -> Self {
        Self::new("")
    }
}
