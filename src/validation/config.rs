//! Validation thresholds.

use serde::{Deserialize, Serialize};

/// Tunable thresholds for the heuristic checks.
///
/// Each field can be overridden independently; the defaults match the
/// documented policy values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Buffer capacities above this are flagged as unusually large.
    pub large_buffer_threshold: i64,
    /// Step duration lengths above this are flagged as unusually long.
    pub long_duration_threshold: f64,
    /// Tolerance when checking that per-source probabilities sum to at
    /// most 1. Guards against false positives from rounding.
    pub probability_epsilon: f64,
}

impl ValidationConfig {
    /// Create a config with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the large-buffer threshold.
    pub fn with_large_buffer_threshold(mut self, threshold: i64) -> Self {
        self.large_buffer_threshold = threshold;
        self
    }

    /// Override the long-duration threshold.
    pub fn with_long_duration_threshold(mut self, threshold: f64) -> Self {
        self.long_duration_threshold = threshold;
        self
    }

    /// Override the probability tolerance.
    pub fn with_probability_epsilon(mut self, epsilon: f64) -> Self {
        self.probability_epsilon = epsilon;
        self
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            large_buffer_threshold: 10_000,
            long_duration_threshold: 100_000.0,
            probability_epsilon: 1e-6,
        }
    }
}
