//! Accelerometer samples and batches

use serde::{Deserialize, Serialize};

/// One triaxial accelerometer reading (milli-g per axis)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccelSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    /// Reading was taken while the vibration motor was running
    #[serde(default)]
    pub did_vibrate: bool,
}

impl AccelSample {
    /// Create a clean sample
    pub fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z, did_vibrate: false }
    }

    /// Create a sample flagged as taken during vibration
    pub fn vibrating(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z, did_vibrate: true }
    }

    /// Axes in x, y, z order
    pub fn axes(&self) -> [i16; 3] {
        [self.x, self.y, self.z]
    }
}

/// Samples delivered together in one feed callback
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccelBatch {
    samples: Vec<AccelSample>,
}

impl AccelBatch {
    pub fn new(samples: Vec<AccelSample>) -> Self {
        Self { samples }
    }

    /// `count` copies of the same sample
    pub fn repeat(sample: AccelSample, count: usize) -> Self {
        Self { samples: vec![sample; count] }
    }

    pub fn samples(&self) -> &[AccelSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Any sample co-occurred with the vibration motor
    pub fn is_contaminated(&self) -> bool {
        self.samples.iter().any(|s| s.did_vibrate)
    }
}

impl From<Vec<AccelSample>> for AccelBatch {
    fn from(samples: Vec<AccelSample>) -> Self {
        Self::new(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contamination_checks_every_sample() {
        let batch = AccelBatch::new(vec![
            AccelSample::new(0, 0, 0),
            AccelSample::new(0, 0, 0),
            AccelSample::vibrating(0, 0, 0),
        ]);
        assert!(batch.is_contaminated());

        let clean = AccelBatch::repeat(AccelSample::new(1, 2, 3), 4);
        assert!(!clean.is_contaminated());
        assert_eq!(clean.len(), 4);
    }

    #[test]
    fn test_did_vibrate_defaults_when_missing() {
        let sample: AccelSample = serde_json::from_str(r#"{"x":1,"y":-2,"z":3}"#).unwrap();
        assert_eq!(sample, AccelSample::new(1, -2, 3));
    }
}
