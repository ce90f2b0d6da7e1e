//! App: the one owned application state every handler runs against
//!
//! Events (sensor batch, timer fire, button) come from a single run loop,
//! one at a time. `App::handle` routes each to the aggregator and the
//! controller, or to the button echo of the feedback build.

use chrono::Utc;
use tracing::debug;

use crate::core::{AlarmController, BatchAggregator, Shell, TimerQueue};
use crate::types::{
    AccelBatch, AlarmState, AppConfig, AppMode, Button, ReasonCode, StepOutput, TimerHandle,
    VibePattern,
};
use crate::TEXT_PRESS_A_BUTTON;

/// Something the run loop delivers to the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Accel(AccelBatch),
    Button(Button),
    Timer(TimerHandle),
}

impl AppEvent {
    /// Short label for output
    pub fn label(&self) -> String {
        match self {
            AppEvent::Accel(_) => "batch".to_string(),
            AppEvent::Button(b) => b.to_string(),
            AppEvent::Timer(h) => h.to_string(),
        }
    }
}

/// Forwards to the real shell and remembers what the device looks like
#[derive(Debug)]
struct ObservedShell<S> {
    inner: S,
    display: String,
    subscribed: bool,
    pulses: Vec<VibePattern>,
}

impl<S: Shell> Shell for ObservedShell<S> {
    fn set_text(&mut self, text: &str) {
        self.display = text.to_string();
        self.inner.set_text(text);
    }

    fn vibrate(&mut self, pattern: VibePattern) {
        self.pulses.push(pattern);
        self.inner.vibrate(pattern);
    }

    fn subscribe_accel(&mut self, batch_size: usize, sampling_rate_hz: u32) {
        self.subscribed = true;
        self.inner.subscribe_accel(batch_size, sampling_rate_hz);
    }

    fn unsubscribe_accel(&mut self) {
        self.subscribed = false;
        self.inner.unsubscribe_accel();
    }
}

/// Application state: config, detector, alarm, shell and timers
#[derive(Debug)]
pub struct App<S: Shell> {
    config: AppConfig,
    aggregator: BatchAggregator,
    controller: AlarmController,
    shell: ObservedShell<S>,
    timers: TimerQueue,
    /// Events handled, including start
    event_count: u64,
}

impl<S: Shell> App<S> {
    /// Create app around a shell. Nothing reaches the shell until [`start`](Self::start).
    pub fn new(config: AppConfig, shell: S) -> Self {
        Self {
            controller: AlarmController::new(&config),
            aggregator: BatchAggregator::new(),
            shell: ObservedShell {
                inner: shell,
                display: String::new(),
                subscribed: false,
                pulses: Vec::new(),
            },
            timers: TimerQueue::new(),
            config,
            event_count: 0,
        }
    }

    /// Window pushed: show the first label and subscribe the sensor
    pub fn start(&mut self) -> StepOutput {
        let reason = match self.config.mode {
            AppMode::Feedback => {
                self.shell.set_text(TEXT_PRESS_A_BUTTON);
                self.shell
                    .subscribe_accel(self.config.batch_size, self.config.sampling_rate_hz);
                ReasonCode::R301_FEEDBACK_STARTED
            }
            AppMode::Motion => self.controller.start(&mut self.shell),
        };
        self.finish("start".to_string(), None, reason)
    }

    /// Handle one event to completion
    pub fn handle(&mut self, event: AppEvent) -> StepOutput {
        let label = event.label();
        let (metric, reason) = match self.config.mode {
            AppMode::Feedback => (None, self.handle_feedback(event)),
            AppMode::Motion => self.handle_motion(event),
        };
        self.finish(label, metric, reason)
    }

    fn handle_feedback(&mut self, event: AppEvent) -> ReasonCode {
        match event {
            AppEvent::Button(button) => {
                let (text, pattern) = match button {
                    Button::Select => ("Double", VibePattern::Double),
                    Button::Up => ("Long", VibePattern::Long),
                    Button::Down => ("Short", VibePattern::Short),
                };
                self.shell.set_text(text);
                self.shell.vibrate(pattern);
                ReasonCode::R301_BUTTON_FEEDBACK
            }
            AppEvent::Accel(_) => {
                // this build pulses on every batch regardless of content
                self.shell.vibrate(VibePattern::Short);
                ReasonCode::R301_BATCH_TEST_PULSE
            }
            AppEvent::Timer(_) => ReasonCode::R202_STALE_TIMER,
        }
    }

    fn handle_motion(&mut self, event: AppEvent) -> (Option<u16>, ReasonCode) {
        match event {
            AppEvent::Accel(batch) => {
                if !self.controller.is_subscribed() {
                    return (None, ReasonCode::R101_BATCH_IGNORED_UNSUBSCRIBED);
                }
                let verdict = self.aggregator.evaluate(&batch);
                match verdict.metric {
                    Some(metric) => {
                        let reason = self.controller.on_metric(
                            metric.value,
                            &mut self.shell,
                            &mut self.timers,
                        );
                        (Some(metric.value), reason)
                    }
                    None => (None, verdict.reason),
                }
            }
            AppEvent::Button(Button::Select) => {
                (None, self.controller.dismiss(&mut self.shell, &mut self.timers))
            }
            AppEvent::Button(_) => (None, ReasonCode::R301_BUTTON_UNUSED),
            AppEvent::Timer(handle) => {
                (None, self.controller.on_timer(handle, &mut self.shell, &mut self.timers))
            }
        }
    }

    fn finish(&mut self, event: String, metric: Option<u16>, reason: ReasonCode) -> StepOutput {
        self.event_count += 1;
        debug!(event = %event, reason = reason.code(), "event handled");
        StepOutput {
            timestamp: Utc::now(),
            at_ms: self.timers.now_ms(),
            event,
            state: self.state(),
            metric,
            reason,
            display: self.shell.display.clone(),
            pulses: std::mem::take(&mut self.shell.pulses),
            subscribed: self.shell.subscribed,
            timer_pending: self.timers.pending_count() > 0,
        }
    }

    /// Alarm state (always idle in the feedback build)
    pub fn state(&self) -> AlarmState {
        match self.config.mode {
            AppMode::Feedback => AlarmState::Idle,
            AppMode::Motion => self.controller.state(),
        }
    }

    pub fn controller(&self) -> &AlarmController {
        &self.controller
    }

    /// Timer queue the run loop drains
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut TimerQueue {
        &mut self.timers
    }

    pub fn shell(&self) -> &S {
        &self.shell.inner
    }

    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell.inner
    }

    /// Current label text
    pub fn display(&self) -> &str {
        &self.shell.display
    }

    pub fn event_count(&self) -> u64 {
        self.event_count
    }
}
