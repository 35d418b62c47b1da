//! Domain value types shared across the model and validation modules.
//!
//! These are plain serde-derived values: durations with their period
//! units and optional distributions, connector routing modes, and the
//! recursive resource request tree attached to operation steps.

use crate::core::error::ElementId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tag for the elements a model definition can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// A processing node with capacity and operation steps.
    Activity,
    /// A directed, probability-weighted edge.
    Connector,
    /// A source node that creates entities over time.
    Generator,
    /// A finite-capacity asset consumed by operation steps.
    Resource,
    /// An item flowing through the model.
    Entity,
    /// The model element itself.
    Model,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Activity => "Activity",
            ElementKind::Connector => "Connector",
            ElementKind::Generator => "Generator",
            ElementKind::Resource => "Resource",
            ElementKind::Entity => "Entity",
            ElementKind::Model => "Model",
        };
        write!(f, "{}", name)
    }
}

/// Time unit a duration length is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodUnit {
    /// Seconds.
    Seconds,
    /// Minutes.
    #[default]
    Minutes,
    /// Hours.
    Hours,
    /// Days.
    Days,
}

/// Whether a duration is fixed or drawn from a distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationKind {
    /// The same length every time.
    #[default]
    Constant,
    /// Length sampled from the attached distribution.
    Distributed,
}

/// Family of a sampling distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionKind {
    /// Normal (Gaussian) distribution.
    Normal,
    /// Exponential distribution.
    Exponential,
    /// Uniform distribution.
    Uniform,
    /// Triangular distribution.
    Triangular,
}

/// Descriptor for a sampled duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// Distribution family.
    pub kind: DistributionKind,
    /// Central value (mean, or midpoint for uniform/triangular).
    pub mean: f64,
    /// Spread around the central value (standard deviation or half-range).
    pub spread: f64,
}

/// A length of simulated time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimDuration {
    /// Length in `unit` units.
    pub length: f64,
    /// Unit the length is expressed in.
    pub unit: PeriodUnit,
    /// Constant or distributed.
    pub kind: DurationKind,
    /// Distribution descriptor, present when `kind` is `Distributed`.
    pub distribution: Option<Distribution>,
}

impl SimDuration {
    /// Create a constant duration.
    pub fn constant(length: f64, unit: PeriodUnit) -> Self {
        Self {
            length,
            unit,
            kind: DurationKind::Constant,
            distribution: None,
        }
    }

    /// Create a distributed duration.
    pub fn distributed(length: f64, unit: PeriodUnit, distribution: Distribution) -> Self {
        Self {
            length,
            unit,
            kind: DurationKind::Distributed,
            distribution: Some(distribution),
        }
    }

    /// A zero-length constant duration.
    pub fn zero() -> Self {
        Self::constant(0.0, PeriodUnit::Minutes)
    }
}

impl Default for SimDuration {
    fn default() -> Self {
        Self::zero()
    }
}

/// Routing mode of a connector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectType {
    /// Entities follow the connector with the given probability.
    #[default]
    Probability,
    /// Routing decided by a condition evaluated at simulation time.
    Conditional,
}

/// Grouping mode of a resource set request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestMode {
    /// Every child request must be satisfied.
    All,
    /// Any one child request satisfies the group.
    Any,
}

/// A resource request attached to an operation step.
///
/// Requests form a tree: a leaf asks for a quantity of one resource, a
/// set groups child requests under AND (`All`) or OR (`Any`) semantics.
/// Traversals preserve the grouping; they never flatten a set into its
/// leaves when the distinction matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceSetRequest {
    /// A request for `quantity` units of one resource.
    Single {
        /// The requested resource.
        resource_id: ElementId,
        /// Units requested. Must be positive.
        quantity: i64,
    },
    /// A grouped request over child requests.
    Set {
        /// AND/OR semantics for the children.
        mode: RequestMode,
        /// Child requests, possibly themselves groups.
        requests: Vec<ResourceSetRequest>,
    },
}

impl ResourceSetRequest {
    /// Convenience constructor for a single-resource request.
    pub fn single(resource_id: ElementId, quantity: i64) -> Self {
        Self::Single {
            resource_id,
            quantity,
        }
    }

    /// Convenience constructor for an AND group.
    pub fn all(requests: Vec<ResourceSetRequest>) -> Self {
        Self::Set {
            mode: RequestMode::All,
            requests,
        }
    }

    /// Convenience constructor for an OR group.
    pub fn any(requests: Vec<ResourceSetRequest>) -> Self {
        Self::Set {
            mode: RequestMode::Any,
            requests,
        }
    }

    /// Collect every `(resource_id, quantity)` leaf in tree order.
    pub fn leaves(&self) -> Vec<(ElementId, i64)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<(ElementId, i64)>) {
        match self {
            ResourceSetRequest::Single {
                resource_id,
                quantity,
            } => out.push((*resource_id, *quantity)),
            ResourceSetRequest::Set { requests, .. } => {
                for request in requests {
                    request.collect_leaves(out);
                }
            }
        }
    }

    /// Check whether the tree requests the given resource anywhere.
    pub fn requests_resource(&self, resource_id: ElementId) -> bool {
        match self {
            ResourceSetRequest::Single { resource_id: id, .. } => *id == resource_id,
            ResourceSetRequest::Set { requests, .. } => requests
                .iter()
                .any(|request| request.requests_resource(resource_id)),
        }
    }
}
