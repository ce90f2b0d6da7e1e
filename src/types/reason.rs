//! Reason codes for every handled event

use serde::{Deserialize, Serialize};

/// Reason codes for all state changes and non-actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R101: Batches
    // =========================================================================
    /// Batch was clean, metric computed
    R101_METRIC_COMPUTED,
    /// A sample was taken during vibration, batch dropped
    R101_BATCH_CONTAMINATED,
    /// Batch had no samples
    R101_BATCH_EMPTY,
    /// Batch arrived while the sensor is unsubscribed
    R101_BATCH_IGNORED_UNSUBSCRIBED,

    // =========================================================================
    // R102: Thresholds
    // =========================================================================
    /// Metric at or below threshold, staying idle
    R102_BELOW_THRESHOLD,

    // =========================================================================
    // R201: Arming
    // =========================================================================
    /// Metric above threshold, alarm armed
    R201_ALARM_ARMED,
    /// Arm condition while already armed, ignored
    R201_ALREADY_ARMED,

    // =========================================================================
    // R202: Timers
    // =========================================================================
    /// Alarm timer fired, pulse sent and timer re-registered
    R202_ALARM_PULSE,
    /// Fire for a handle the controller no longer owns
    R202_STALE_TIMER,
    /// Resume timer fired, sensor resubscribed
    R202_SENSOR_RESUMED,

    // =========================================================================
    // R203: Dismissal
    // =========================================================================
    /// User dismissed the alarm
    R203_ALARM_DISMISSED,
    /// Dismiss while idle, nothing to cancel
    R203_DISMISS_WHILE_IDLE,

    // =========================================================================
    // R204: Lifecycle
    // =========================================================================
    /// Sensor subscribed, monitoring started
    R204_MONITORING_STARTED,

    // =========================================================================
    // R301: Feedback build
    // =========================================================================
    /// Feedback build started
    R301_FEEDBACK_STARTED,
    /// Button echoed with a vibration pattern
    R301_BUTTON_FEEDBACK,
    /// Sensor batch answered with a test pulse
    R301_BATCH_TEST_PULSE,
    /// Button has no binding in this build
    R301_BUTTON_UNUSED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_METRIC_COMPUTED => "R101_METRIC_COMPUTED",
            Self::R101_BATCH_CONTAMINATED => "R101_BATCH_CONTAMINATED",
            Self::R101_BATCH_EMPTY => "R101_BATCH_EMPTY",
            Self::R101_BATCH_IGNORED_UNSUBSCRIBED => "R101_BATCH_IGNORED_UNSUBSCRIBED",
            Self::R102_BELOW_THRESHOLD => "R102_BELOW_THRESHOLD",
            Self::R201_ALARM_ARMED => "R201_ALARM_ARMED",
            Self::R201_ALREADY_ARMED => "R201_ALREADY_ARMED",
            Self::R202_ALARM_PULSE => "R202_ALARM_PULSE",
            Self::R202_STALE_TIMER => "R202_STALE_TIMER",
            Self::R202_SENSOR_RESUMED => "R202_SENSOR_RESUMED",
            Self::R203_ALARM_DISMISSED => "R203_ALARM_DISMISSED",
            Self::R203_DISMISS_WHILE_IDLE => "R203_DISMISS_WHILE_IDLE",
            Self::R204_MONITORING_STARTED => "R204_MONITORING_STARTED",
            Self::R301_FEEDBACK_STARTED => "R301_FEEDBACK_STARTED",
            Self::R301_BUTTON_FEEDBACK => "R301_BUTTON_FEEDBACK",
            Self::R301_BATCH_TEST_PULSE => "R301_BATCH_TEST_PULSE",
            Self::R301_BUTTON_UNUSED => "R301_BUTTON_UNUSED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_METRIC_COMPUTED => "Deviation computed",
            Self::R101_BATCH_CONTAMINATED => "Batch taken during vibration, dropped",
            Self::R101_BATCH_EMPTY => "Empty batch, dropped",
            Self::R101_BATCH_IGNORED_UNSUBSCRIBED => "Sensor unsubscribed, batch ignored",
            Self::R102_BELOW_THRESHOLD => "Deviation within threshold",
            Self::R201_ALARM_ARMED => "Alarm armed",
            Self::R201_ALREADY_ARMED => "Alarm already armed",
            Self::R202_ALARM_PULSE => "Alarm pulse, timer re-registered",
            Self::R202_STALE_TIMER => "Stale timer ignored",
            Self::R202_SENSOR_RESUMED => "Sensor resubscribed",
            Self::R203_ALARM_DISMISSED => "Alarm dismissed",
            Self::R203_DISMISS_WHILE_IDLE => "Nothing to dismiss",
            Self::R204_MONITORING_STARTED => "Monitoring started",
            Self::R301_FEEDBACK_STARTED => "Waiting for buttons",
            Self::R301_BUTTON_FEEDBACK => "Button feedback",
            Self::R301_BATCH_TEST_PULSE => "Test pulse for batch",
            Self::R301_BUTTON_UNUSED => "Button not bound",
        }
    }

    /// Did this event change what the device is doing?
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            Self::R201_ALARM_ARMED | Self::R203_ALARM_DISMISSED | Self::R202_SENSOR_RESUMED
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
