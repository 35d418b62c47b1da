//! Element records that make up a model definition.
//!
//! All elements are plain values with an [`ElementId`] identity. The
//! validator never mutates them; the editing layer builds and updates
//! them through the `with_*` builders or plain field access.

use crate::core::error::ElementId;
use crate::core::types::{ConnectType, ResourceSetRequest, SimDuration};
use serde::{Deserialize, Serialize};

/// One unit of processing inside an activity.
///
/// A step takes `duration` of simulated time and may hold resources for
/// that span, described by the optional request tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationStep {
    /// Resources held for the span of this step, if any.
    pub requirement: Option<ResourceSetRequest>,
    /// Simulated time this step takes.
    pub duration: SimDuration,
}

impl OperationStep {
    /// Create a step with the given duration and no resource requirement.
    pub fn new(duration: SimDuration) -> Self {
        Self {
            requirement: None,
            duration,
        }
    }

    /// Attach a resource requirement.
    pub fn with_requirement(mut self, requirement: ResourceSetRequest) -> Self {
        self.requirement = Some(requirement);
        self
    }
}

/// A processing node: entities queue up, occupy capacity, and run
/// through the operation steps in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier.
    pub id: ElementId,
    /// Display name. May be empty, which validation flags.
    pub name: String,
    /// Number of entities the activity can process at once.
    pub capacity: i64,
    /// Entities that can wait in front of the activity.
    pub input_buffer_capacity: i64,
    /// Entities that can wait behind the activity.
    pub output_buffer_capacity: i64,
    /// Ordered processing steps.
    pub operation_steps: Vec<OperationStep>,
}

impl Activity {
    /// Create an activity with the given name and default capacities.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(),
            name: name.into(),
            capacity: 1,
            input_buffer_capacity: 0,
            output_buffer_capacity: 0,
            operation_steps: Vec::new(),
        }
    }

    /// Create with a specific ID.
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    /// Set the processing capacity.
    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the input/output buffer capacities.
    pub fn with_buffers(mut self, input: i64, output: i64) -> Self {
        self.input_buffer_capacity = input;
        self.output_buffer_capacity = output;
        self
    }

    /// Append an operation step.
    pub fn with_step(mut self, step: OperationStep) -> Self {
        self.operation_steps.push(step);
        self
    }
}

/// A directed, probability-weighted edge between two nodes
/// (activities or generators).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    /// Unique identifier.
    pub id: ElementId,
    /// Display name. Connectors are often unnamed.
    pub name: String,
    /// Node the connector leaves from.
    pub source_id: ElementId,
    /// Node the connector arrives at.
    pub target_id: ElementId,
    /// Routing probability in `[0, 1]`.
    pub probability: f64,
    /// Routing mode.
    pub connect_type: ConnectType,
}

impl Connector {
    /// Create a connector between two nodes with probability 1.
    pub fn new(source_id: ElementId, target_id: ElementId) -> Self {
        Self {
            id: ElementId::new(),
            name: String::new(),
            source_id,
            target_id,
            probability: 1.0,
            connect_type: ConnectType::Probability,
        }
    }

    /// Create with a specific ID.
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the routing probability.
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Set the routing mode.
    pub fn with_connect_type(mut self, connect_type: ConnectType) -> Self {
        self.connect_type = connect_type;
        self
    }
}

/// A source node that creates entities into the model over time.
///
/// The creation bounds (`periodic_occurrences`, `entities_per_creation`,
/// `max_entities`) are positive numbers; `f64::INFINITY` is the
/// distinguished "unbounded" value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generator {
    /// Unique identifier.
    pub id: ElementId,
    /// Display name.
    pub name: String,
    /// Activity that receives the created entities.
    pub activity_key_id: ElementId,
    /// Kind of entity created.
    pub entity_id: ElementId,
    /// How many creation events occur per period.
    pub periodic_occurrences: f64,
    /// Entities created per creation event.
    pub entities_per_creation: f64,
    /// Total entities ever created. `f64::INFINITY` for no limit.
    pub max_entities: f64,
    /// Interval between creation periods.
    pub period_interval_duration: SimDuration,
    /// Offset before the first creation period.
    pub periodic_start_duration: SimDuration,
}

impl Generator {
    /// Create a generator feeding `activity_key_id` with `entity_id` entities.
    pub fn new(activity_key_id: ElementId, entity_id: ElementId) -> Self {
        Self {
            id: ElementId::new(),
            name: String::new(),
            activity_key_id,
            entity_id,
            periodic_occurrences: 1.0,
            entities_per_creation: 1.0,
            max_entities: f64::INFINITY,
            period_interval_duration: SimDuration::default(),
            periodic_start_duration: SimDuration::zero(),
        }
    }

    /// Create with a specific ID.
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the creation bounds.
    pub fn with_bounds(
        mut self,
        periodic_occurrences: f64,
        entities_per_creation: f64,
        max_entities: f64,
    ) -> Self {
        self.periodic_occurrences = periodic_occurrences;
        self.entities_per_creation = entities_per_creation;
        self.max_entities = max_entities;
        self
    }

    /// Set the period interval duration.
    pub fn with_interval(mut self, duration: SimDuration) -> Self {
        self.period_interval_duration = duration;
        self
    }

    /// Set the start offset duration.
    pub fn with_start(mut self, duration: SimDuration) -> Self {
        self.periodic_start_duration = duration;
        self
    }
}

/// A finite-capacity asset consumed by operation steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique identifier.
    pub id: ElementId,
    /// Display name.
    pub name: String,
    /// Units available. Must be positive.
    pub capacity: i64,
}

impl Resource {
    /// Create a resource with the given name and capacity.
    pub fn new(name: impl Into<String>, capacity: i64) -> Self {
        Self {
            id: ElementId::new(),
            name: name.into(),
            capacity,
        }
    }

    /// Create with a specific ID.
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }
}

/// An item flowing through the model. Identity only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier.
    pub id: ElementId,
    /// Display name.
    pub name: String,
}

impl Entity {
    /// Create an entity with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(),
            name: name.into(),
        }
    }

    /// Create with a specific ID.
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }
}

/// The model element itself: identity and descriptive metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Unique identifier.
    pub id: ElementId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

impl ModelInfo {
    /// Create model metadata with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(),
            name: name.into(),
            description: String::new(),
        }
    }
}
