//! Diagnostic messages and the validation report.
//!
//! Every distinct finding has a factory constructor here so that rule
//! code never formats message text inline and the wording of each
//! diagnostic lives in exactly one place.

use crate::core::error::{ElementId, RuleError};
use crate::core::types::ElementKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The model cannot be used until this is fixed.
    Error,
    /// Suspicious but non-blocking.
    Warning,
    /// Informational only. Excluded from the summary counts.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{}", name)
    }
}

/// Side of a node a connectivity finding refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Connectors arriving at the node.
    Incoming,
    /// Connectors leaving the node.
    Outgoing,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Incoming => "incoming",
            Direction::Outgoing => "outgoing",
        };
        write!(f, "{}", name)
    }
}

/// One diagnostic finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationMessage {
    /// Severity of the finding.
    pub severity: Severity,
    /// Human-readable description.
    pub text: String,
    /// The offending element, when the finding points at one.
    pub element_id: Option<ElementId>,
}

impl ValidationMessage {
    fn new(severity: Severity, text: String, element_id: Option<ElementId>) -> Self {
        Self {
            severity,
            text,
            element_id,
        }
    }

    /// The model is missing a required top-level element kind.
    pub fn missing_required_element(kind: ElementKind) -> Self {
        Self::new(
            Severity::Error,
            format!("model has no {} elements; at least one is required", kind),
            None,
        )
    }

    /// The model defines none of an expected (but not required) kind.
    pub fn no_elements(kind: ElementKind) -> Self {
        Self::new(
            Severity::Warning,
            format!("model defines no {} elements", kind),
            None,
        )
    }

    /// A node has no connectors on one side.
    pub fn no_connections(id: ElementId, direction: Direction) -> Self {
        Self::new(
            Severity::Warning,
            format!("node {} has no {} connectors", id, direction),
            Some(id),
        )
    }

    /// An element has an empty display name.
    pub fn missing_name(kind: ElementKind, id: ElementId) -> Self {
        Self::new(
            Severity::Warning,
            format!("{} {} has no name", kind, id),
            Some(id),
        )
    }

    /// An activity or resource capacity is not positive.
    pub fn invalid_capacity(kind: ElementKind, id: ElementId, capacity: i64) -> Self {
        Self::new(
            Severity::Error,
            format!(
                "{} {} has invalid capacity {}; capacity must be positive",
                kind, id, capacity
            ),
            Some(id),
        )
    }

    /// A buffer capacity is negative.
    pub fn invalid_buffer_capacity(id: ElementId, which: &str, capacity: i64) -> Self {
        Self::new(
            Severity::Error,
            format!(
                "activity {} has negative {} buffer capacity {}",
                id, which, capacity
            ),
            Some(id),
        )
    }

    /// A buffer capacity is above the configured heuristic threshold.
    pub fn large_buffer_capacity(id: ElementId, which: &str, capacity: i64, threshold: i64) -> Self {
        Self::new(
            Severity::Warning,
            format!(
                "activity {} has unusually large {} buffer capacity {} (threshold {})",
                id, which, capacity, threshold
            ),
            Some(id),
        )
    }

    /// An activity has no operation steps.
    pub fn no_operation_steps(id: ElementId) -> Self {
        Self::new(
            Severity::Warning,
            format!("activity {} has no operation steps", id),
            Some(id),
        )
    }

    /// A step duration length is negative.
    pub fn invalid_step_duration(id: ElementId, step: usize, length: f64) -> Self {
        Self::new(
            Severity::Error,
            format!(
                "activity {} step {} has negative duration {}",
                id, step, length
            ),
            Some(id),
        )
    }

    /// A step duration length is above the configured heuristic threshold.
    pub fn unusual_step_duration(id: ElementId, step: usize, length: f64, threshold: f64) -> Self {
        Self::new(
            Severity::Warning,
            format!(
                "activity {} step {} has unusually long duration {} (threshold {})",
                id, step, length, threshold
            ),
            Some(id),
        )
    }

    /// An element references an id that does not resolve.
    pub fn invalid_connection(
        kind: ElementKind,
        id: ElementId,
        role: &str,
        missing: ElementId,
    ) -> Self {
        Self::new(
            Severity::Error,
            format!(
                "{} {} references unknown {} {}",
                kind, id, role, missing
            ),
            Some(id),
        )
    }

    /// A connector probability is outside `[0, 1]`.
    pub fn invalid_probability(id: ElementId, probability: f64) -> Self {
        Self::new(
            Severity::Error,
            format!(
                "connector {} has probability {} outside [0, 1]",
                id, probability
            ),
            Some(id),
        )
    }

    /// The probabilities of connectors sharing a source sum past 1.
    pub fn probability_sum_exceeded(source_id: ElementId, excess: f64) -> Self {
        Self::new(
            Severity::Error,
            format!(
                "outgoing connector probabilities of node {} sum to more than 1 (excess {})",
                source_id, excess
            ),
            Some(source_id),
        )
    }

    /// A generator creation bound is not positive or unbounded.
    pub fn generator_bound(id: ElementId, category: &str, value: f64) -> Self {
        Self::new(
            Severity::Error,
            format!(
                "generator {} has invalid {} {}; must be positive or unbounded",
                id, category, value
            ),
            Some(id),
        )
    }

    /// A resource request leaf names a resource that does not exist.
    pub fn unknown_resource(activity_id: ElementId, step: usize, resource_id: ElementId) -> Self {
        Self::new(
            Severity::Error,
            format!(
                "activity {} step {} requests unknown resource {}",
                activity_id, step, resource_id
            ),
            Some(activity_id),
        )
    }

    /// A resource request quantity is not positive.
    pub fn invalid_resource_quantity(
        activity_id: ElementId,
        step: usize,
        resource_id: ElementId,
        quantity: i64,
    ) -> Self {
        Self::new(
            Severity::Error,
            format!(
                "activity {} step {} requests resource {} with invalid quantity {}",
                activity_id, step, resource_id, quantity
            ),
            Some(activity_id),
        )
    }

    /// The same resource appears twice in one step's request tree.
    pub fn duplicate_resource_request(
        activity_id: ElementId,
        step: usize,
        resource_id: ElementId,
    ) -> Self {
        Self::new(
            Severity::Error,
            format!(
                "activity {} step {} requests resource {} more than once",
                activity_id, step, resource_id
            ),
            Some(activity_id),
        )
    }

    /// Structurally concurrent demand on a resource exceeds its capacity.
    ///
    /// This is a static over-approximation of simultaneous demand, not a
    /// guarantee that the shortfall occurs at simulation time.
    pub fn resource_capacity_exceeded(resource_id: ElementId, demand: i64, capacity: i64) -> Self {
        Self::new(
            Severity::Warning,
            format!(
                "resource {} may be over-demanded: concurrent requests total {} against capacity {}",
                resource_id, demand, capacity
            ),
            Some(resource_id),
        )
    }

    /// The connector graph contains a directed cycle.
    pub fn cycle_detected(node_ids: &[ElementId]) -> Self {
        let nodes: Vec<String> = node_ids.iter().map(|id| id.to_string()).collect();
        Self::new(
            Severity::Info,
            format!("connector cycle detected involving nodes: {}", nodes.join(", ")),
            None,
        )
    }

    /// An entity is referenced by no generator.
    pub fn unused_entity(id: ElementId) -> Self {
        Self::new(
            Severity::Info,
            format!("entity {} is not created by any generator", id),
            Some(id),
        )
    }

    /// A rule failed internally; the pass was cut short.
    pub fn internal_failure(error: &RuleError) -> Self {
        Self::new(
            Severity::Error,
            format!("internal validation failure: {}", error),
            None,
        )
    }
}

/// Summary counts of a validation report. Info messages are excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Number of error messages.
    pub error_count: usize,
    /// Number of warning messages.
    pub warning_count: usize,
}

/// The result of one validation pass: the ordered message sequence
/// plus summary counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// All findings, in rule invocation order.
    pub messages: Vec<ValidationMessage>,
    /// Per-severity counts, maintained on every push.
    pub summary: ValidationSummary,
}

impl ValidationReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, updating the summary.
    pub fn push(&mut self, message: ValidationMessage) {
        match message.severity {
            Severity::Error => self.summary.error_count += 1,
            Severity::Warning => self.summary.warning_count += 1,
            Severity::Info => {}
        }
        self.messages.push(message);
    }

    /// Append a sequence of messages in order.
    pub fn extend(&mut self, messages: impl IntoIterator<Item = ValidationMessage>) {
        for message in messages {
            self.push(message);
        }
    }

    /// Number of error messages.
    pub fn error_count(&self) -> usize {
        self.summary.error_count
    }

    /// Number of warning messages.
    pub fn warning_count(&self) -> usize {
        self.summary.warning_count
    }

    /// Whether any error-severity message is present.
    pub fn has_errors(&self) -> bool {
        self.summary.error_count > 0
    }

    /// Conversion gate: a model with errors must not be converted.
    pub fn can_convert(&self) -> bool {
        !self.has_errors()
    }

    /// Whether the report holds no messages at all.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Total number of messages, info included.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Iterate over messages in order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_tracks_pushes() {
        let mut report = ValidationReport::new();
        report.push(ValidationMessage::missing_required_element(
            ElementKind::Activity,
        ));
        report.push(ValidationMessage::no_elements(ElementKind::Generator));
        report.push(ValidationMessage::unused_entity(ElementId::new()));

        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.len(), 3);
        assert!(report.has_errors());
        assert!(!report.can_convert());
    }

    #[test]
    fn test_info_excluded_from_counts() {
        let mut report = ValidationReport::new();
        report.push(ValidationMessage::unused_entity(ElementId::new()));

        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 0);
        assert_eq!(report.len(), 1);
        assert!(report.can_convert());
    }

    #[test]
    fn test_message_points_at_element() {
        let id = ElementId::new();
        let message = ValidationMessage::invalid_capacity(ElementKind::Activity, id, 0);
        assert_eq!(message.element_id, Some(id));
        assert_eq!(message.severity, Severity::Error);
        assert!(message.text.contains(&id.to_string()));
    }

    #[test]
    fn test_report_serde_round_trip() {
        let mut report = ValidationReport::new();
        report.push(ValidationMessage::no_operation_steps(ElementId::new()));

        let json = serde_json::to_string(&report).unwrap();
        let back: ValidationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
