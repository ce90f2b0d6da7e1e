//! Integration tests for Slice 1
//!
//! Tests the detector path: raw samples → normalize → aggregate → deviation

use stillwatch::core::{normalize, BatchAggregator};
use stillwatch::types::{AccelBatch, AccelSample, ReasonCode};
use stillwatch::NORMALIZE_BIAS;

fn batch(samples: &[(i16, i16, i16)]) -> AccelBatch {
    samples
        .iter()
        .map(|&(x, y, z)| AccelSample::new(x, y, z))
        .collect::<Vec<_>>()
        .into()
}

/// normalize(v) == v + 4000 when non-negative, else 0
#[test]
fn test_normalize_matches_biased_value() {
    for raw in [i16::MIN, -8000, -4001, -4000, -3999, -1, 0, 1, 1000, 28767, i16::MAX] {
        let biased = i32::from(raw) + NORMALIZE_BIAS;
        let expected = if biased >= 0 { biased as u16 } else { 0 };
        assert_eq!(normalize(raw), expected, "raw={}", raw);
    }
}

/// Documented example: extremes average to 2000 with deviation 2000
#[test]
fn test_reference_batch() {
    let agg = BatchAggregator::new();
    let metric = agg
        .aggregate(&batch(&[(-4000, -4000, -4000), (0, 0, 0)]))
        .expect("clean batch yields a metric");
    assert_eq!(metric.averages, [2000, 2000, 2000]);
    assert_eq!(metric.value, 2000);
}

#[test]
fn test_size_one_batch_is_zero() {
    let agg = BatchAggregator::new();
    for s in [(-32768, 0, 32767), (0, 0, -1000), (500, 500, 500)] {
        assert_eq!(agg.aggregate(&batch(&[s])).map(|m| m.value), Some(0));
    }
}

#[test]
fn test_identical_samples_are_zero() {
    let agg = BatchAggregator::new();
    let resting = AccelBatch::repeat(AccelSample::new(12, -40, -990), 10);
    assert_eq!(agg.aggregate(&resting).map(|m| m.value), Some(0));
}

/// Contamination anywhere drops the whole batch, whatever the values
#[test]
fn test_contaminated_batch_has_no_metric() {
    let agg = BatchAggregator::new();
    for position in 0..10 {
        let samples: Vec<_> = (0..10)
            .map(|i| {
                if i == position {
                    AccelSample::vibrating(-4000, -4000, -4000)
                } else {
                    AccelSample::new(0, 0, 0)
                }
            })
            .collect();
        let verdict = agg.evaluate(&AccelBatch::new(samples));
        assert_eq!(verdict.metric, None, "contaminated at {}", position);
        assert_eq!(verdict.reason, ReasonCode::R101_BATCH_CONTAMINATED);
    }
}

/// A realistic wrist-flick: one axis swings, others stay
#[test]
fn test_single_axis_swing() {
    let agg = BatchAggregator::new();
    let mut samples = vec![(0, 0, -1000); 9];
    samples.push((1500, 0, -1000));
    let metric = agg.aggregate(&batch(&samples)).unwrap();
    // x avg: (9*4000 + 5500) / 10 = 4150 → max dev 5500-4150 = 1350
    assert_eq!(metric.averages[0], 4150);
    assert_eq!(metric.value, 1350);
}

/// Gentle drift stays well below the default threshold
#[test]
fn test_small_tremor_is_small() {
    let agg = BatchAggregator::new();
    let samples: Vec<(i16, i16, i16)> = (0..10).map(|i| (i * 5, -(i * 3), -1000 + i)).collect();
    let metric = agg.aggregate(&batch(&samples)).unwrap();
    assert!(metric.value < 100, "got {}", metric.value);
}
