//! Batch aggregator: per-axis averages and the largest deviation from them
//!
//! A batch containing any sample taken during vibration is dropped whole;
//! averages skewed by the motor would make every later comparison suspect.

use tracing::{debug, warn};

use crate::core::normalize;
use crate::types::{AccelBatch, AccelSample, BatchVerdict, DeviationMetric, ReasonCode};

/// Stateless batch aggregator
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchAggregator;

impl BatchAggregator {
    /// Create new aggregator
    pub fn new() -> Self {
        Self
    }

    /// Deviation metric of a batch, or `None` when the batch is contaminated or empty
    pub fn aggregate(&self, batch: &AccelBatch) -> Option<DeviationMetric> {
        self.evaluate(batch).metric
    }

    /// Same as [`aggregate`](Self::aggregate) but keeps the reason a batch was dropped
    pub fn evaluate(&self, batch: &AccelBatch) -> BatchVerdict {
        if batch.is_contaminated() {
            debug!(samples = batch.len(), "batch taken during vibration, dropped");
            return BatchVerdict::discarded(ReasonCode::R101_BATCH_CONTAMINATED);
        }
        if batch.is_empty() {
            warn!("empty accelerometer batch");
            return BatchVerdict::discarded(ReasonCode::R101_BATCH_EMPTY);
        }

        let samples = batch.samples();
        let averages = axis_averages(samples);
        let value = max_deviation(samples, averages);

        debug!(
            deviation = value,
            avg_x = averages[0],
            avg_y = averages[1],
            avg_z = averages[2],
            "batch aggregated"
        );

        BatchVerdict::measured(DeviationMetric {
            value,
            averages,
            sample_count: samples.len(),
        })
    }
}

/// Truncating mean of normalized values per axis. `samples` must be non-empty.
fn axis_averages(samples: &[AccelSample]) -> [u16; 3] {
    let mut sums = [0u64; 3];
    for sample in samples {
        for (sum, raw) in sums.iter_mut().zip(sample.axes()) {
            *sum += u64::from(normalize(raw));
        }
    }
    let count = samples.len() as u64;
    // every normalized value fits u16, so does their mean
    sums.map(|sum| (sum / count) as u16)
}

fn max_deviation(samples: &[AccelSample], averages: [u16; 3]) -> u16 {
    samples
        .iter()
        .flat_map(|sample| {
            sample
                .axes()
                .into_iter()
                .zip(averages)
                .map(|(raw, avg)| normalize(raw).abs_diff(avg))
        })
        .max()
        .unwrap_or(0)
}
