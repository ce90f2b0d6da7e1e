//! Deviation metric produced by the batch aggregator

use serde::{Deserialize, Serialize};
use crate::types::ReasonCode;

/// Largest per-axis deviation from the batch averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviationMetric {
    /// max |normalized - average| over all samples and axes
    pub value: u16,
    /// Per-axis averages of normalized values (x, y, z)
    pub averages: [u16; 3],
    /// Samples that went into the averages
    pub sample_count: usize,
}

/// Aggregator outcome for one batch, with the reason when no metric exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchVerdict {
    pub metric: Option<DeviationMetric>,
    pub reason: ReasonCode,
}

impl BatchVerdict {
    pub fn measured(metric: DeviationMetric) -> Self {
        Self { metric: Some(metric), reason: ReasonCode::R101_METRIC_COMPUTED }
    }

    pub fn discarded(reason: ReasonCode) -> Self {
        Self { metric: None, reason }
    }
}
