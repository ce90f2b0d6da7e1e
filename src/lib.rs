//! Stillwatch: motion-threshold detector with a self-rearming vibration alarm
//!
//! sensor batch → normalizer → aggregator → AlarmController → shell
//!
//! The shell (display, vibration motor, accelerometer feed) is an external
//! collaborator; this crate ships a recording shell and a host simulator
//! that drives the core from a script or live from stdin.

pub mod core;
pub mod types;

// =============================================================================
// SENSOR [C] - Accelerometer feed
// =============================================================================

/// Bias added to raw axis readings before averaging
pub const NORMALIZE_BIAS: i32 = 4000;

/// Samples delivered per accelerometer batch
pub const BATCH_SIZE: usize = 10;

/// Upper bound on samples in one batch, configured or scripted
pub const MAX_BATCH_SAMPLES: usize = 1024;

/// Accelerometer sampling rate (Hz) - one batch per second at the default size
pub const SAMPLING_RATE_HZ: u32 = 10;

// =============================================================================
// THRESHOLDS [C] - Deviation units are normalized milli-g
// =============================================================================

/// Default deviation threshold above which the alarm arms
pub const DEVIATION_THRESHOLD: u16 = 1000;

/// Less sensitive threshold used by the later build
pub const DEVIATION_THRESHOLD_RELAXED: u16 = 1300;

// =============================================================================
// ALARM [C]
// =============================================================================

/// Interval between alarm pulses (milliseconds)
pub const ALARM_INTERVAL_MS: u64 = 1000;

/// Delay before resubscribing to the sensor after dismissal (milliseconds).
/// 0 = resubscribe immediately.
pub const RESUBSCRIBE_DELAY_MS: u64 = 0;

// =============================================================================
// DISPLAY TEXT
// =============================================================================

pub const TEXT_MONITORING: &str = "Reading Accel";
pub const TEXT_ALARMING: &str = "Vibrating";
pub const TEXT_DISMISSED: &str = "Dismissed";
pub const TEXT_PRESS_A_BUTTON: &str = "Press a button";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
