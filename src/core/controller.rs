//! Alarm controller: two-state machine with a self-rearming pulse timer
//!
//! State transitions:
//! - IDLE → ARMED: deviation > threshold (register timer, unsubscribe sensor)
//! - ARMED → ARMED: own timer fires (pulse, register again)
//! - ARMED → IDLE: dismiss (cancel timer, resubscribe sensor)
//! - IDLE → IDLE: deviation <= threshold, or dismiss with nothing to cancel
//!
//! At most one timer registration is outstanding at any time.

use tracing::{info, warn};

use crate::core::{Shell, TimerService};
use crate::types::{AlarmState, AppConfig, ReasonCode, TimerHandle, VibePattern};
use crate::{TEXT_ALARMING, TEXT_DISMISSED, TEXT_MONITORING};

/// The one outstanding timer and what it is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingTimer {
    /// Next alarm pulse
    Pulse(TimerHandle),
    /// Delayed resubscribe after dismissal
    Resume(TimerHandle),
}

impl PendingTimer {
    fn handle(&self) -> TimerHandle {
        match self {
            PendingTimer::Pulse(h) | PendingTimer::Resume(h) => *h,
        }
    }
}

/// Motion alarm state machine
#[derive(Debug)]
pub struct AlarmController {
    /// Deviation above which the alarm arms
    threshold: u16,
    /// Interval between pulses
    interval_ms: u64,
    /// Wait after dismissal before resubscribing (0 = immediately)
    resubscribe_delay_ms: u64,
    /// Pattern sent on every pulse
    pattern: VibePattern,
    /// Feed parameters for (re)subscription
    batch_size: usize,
    sampling_rate_hz: u32,
    /// Current state
    state: AlarmState,
    /// Outstanding timer, if any
    pending: Option<PendingTimer>,
    /// Whether we asked the shell for accelerometer batches
    subscribed: bool,
    /// Pulses sent since the alarm last armed
    pulse_count: u64,
}

impl AlarmController {
    /// Create controller from config. Call [`start`](Self::start) before feeding it.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            threshold: config.deviation_threshold,
            interval_ms: config.alarm_interval_ms,
            resubscribe_delay_ms: config.resubscribe_delay_ms,
            pattern: config.alarm_pattern,
            batch_size: config.batch_size,
            sampling_rate_hz: config.sampling_rate_hz,
            state: AlarmState::Idle,
            pending: None,
            subscribed: false,
            pulse_count: 0,
        }
    }

    /// Subscribe to the sensor and show the monitoring label
    pub fn start<S: Shell>(&mut self, shell: &mut S) -> ReasonCode {
        self.resubscribe(shell);
        ReasonCode::R204_MONITORING_STARTED
    }

    /// Feed the deviation of one clean batch
    pub fn on_metric<S: Shell, T: TimerService>(
        &mut self,
        deviation: u16,
        shell: &mut S,
        timers: &mut T,
    ) -> ReasonCode {
        match self.state {
            AlarmState::Armed => ReasonCode::R201_ALREADY_ARMED,
            AlarmState::Idle if !self.subscribed => ReasonCode::R101_BATCH_IGNORED_UNSUBSCRIBED,
            AlarmState::Idle if deviation > self.threshold => {
                self.arm(deviation, shell, timers);
                ReasonCode::R201_ALARM_ARMED
            }
            AlarmState::Idle => ReasonCode::R102_BELOW_THRESHOLD,
        }
    }

    /// Handle a timer fire delivered by the run loop
    pub fn on_timer<S: Shell, T: TimerService>(
        &mut self,
        handle: TimerHandle,
        shell: &mut S,
        timers: &mut T,
    ) -> ReasonCode {
        match self.pending {
            Some(PendingTimer::Pulse(h)) if h == handle => {
                shell.vibrate(self.pattern);
                self.pulse_count += 1;
                self.pending = Some(PendingTimer::Pulse(timers.register(self.interval_ms)));
                ReasonCode::R202_ALARM_PULSE
            }
            Some(PendingTimer::Resume(h)) if h == handle => {
                self.pending = None;
                self.resubscribe(shell);
                info!("sensor resubscribed after dismissal delay");
                ReasonCode::R202_SENSOR_RESUMED
            }
            _ => {
                warn!(%handle, "fire for a timer the controller does not own");
                ReasonCode::R202_STALE_TIMER
            }
        }
    }

    /// User dismissal: cancel the alarm and go back to monitoring
    pub fn dismiss<S: Shell, T: TimerService>(
        &mut self,
        shell: &mut S,
        timers: &mut T,
    ) -> ReasonCode {
        if self.state == AlarmState::Idle {
            return ReasonCode::R203_DISMISS_WHILE_IDLE;
        }

        if let Some(pending) = self.pending.take() {
            timers.cancel(pending.handle());
        }
        self.state = AlarmState::Idle;
        info!(pulses = self.pulse_count, "alarm dismissed");

        if self.resubscribe_delay_ms == 0 {
            self.resubscribe(shell);
        } else {
            shell.set_text(TEXT_DISMISSED);
            self.pending = Some(PendingTimer::Resume(timers.register(self.resubscribe_delay_ms)));
        }
        ReasonCode::R203_ALARM_DISMISSED
    }

    fn arm<S: Shell, T: TimerService>(&mut self, deviation: u16, shell: &mut S, timers: &mut T) {
        self.pending = Some(PendingTimer::Pulse(timers.register(self.interval_ms)));
        self.state = AlarmState::Armed;
        self.pulse_count = 0;
        self.subscribed = false;
        shell.unsubscribe_accel();
        shell.set_text(TEXT_ALARMING);
        info!(deviation, threshold = self.threshold, "alarm armed");
    }

    fn resubscribe<S: Shell>(&mut self, shell: &mut S) {
        self.subscribed = true;
        shell.subscribe_accel(self.batch_size, self.sampling_rate_hz);
        shell.set_text(TEXT_MONITORING);
    }

    /// Get current state
    pub fn state(&self) -> AlarmState {
        self.state
    }

    /// Handle of the outstanding timer
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending.map(|p| p.handle())
    }

    /// Is the sensor feed currently wanted?
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    /// Pulses since the alarm last armed
    pub fn pulse_count(&self) -> u64 {
        self.pulse_count
    }
}

// =============================================================================
// TESTS
// =============================================================================
