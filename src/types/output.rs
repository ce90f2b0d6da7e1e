//! Output structures for terminal display

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::{AlarmState, ReasonCode, VibePattern};

/// Output record for each handled event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutput {
    /// Wall-clock timestamp
    pub timestamp: DateTime<Utc>,
    /// Run-loop time of the event (milliseconds since start)
    pub at_ms: u64,
    /// What was delivered: "start", "batch", "select", "timer#3", ...
    pub event: String,
    /// Alarm state after the event
    pub state: AlarmState,
    /// Deviation metric, when the event was a clean batch
    pub metric: Option<u16>,
    /// Why the event ended as it did
    pub reason: ReasonCode,
    /// Display text after the event
    pub display: String,
    /// Vibration pulses sent while handling the event
    pub pulses: Vec<VibePattern>,
    /// Accelerometer feed subscribed after the event
    pub subscribed: bool,
    /// A timer registration is outstanding after the event
    pub timer_pending: bool,
}

impl StepOutput {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let head = format!(
            "{} [{:>6}ms] {:<8} state={}",
            self.state.emoji(),
            self.at_ms,
            self.event,
            self.state
        );
        let head = match self.state {
            AlarmState::Idle => head.green(),
            AlarmState::Armed => head.red().bold(),
        };
        let metric = self
            .metric
            .map(|m| format!(" | deviation={}", m))
            .unwrap_or_default();
        let pulses = if self.pulses.is_empty() {
            String::new()
        } else {
            format!(" | vibe={}", self.pulse_list())
        };

        format!(
            "{}{}{} | \"{}\" | {}",
            head,
            metric,
            pulses.yellow(),
            self.display,
            self.reason.code().dimmed()
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "t={} | event={} | state={} | deviation={} | vibe={} | display={} | subscribed={} | timer={} | reason={}",
            self.at_ms,
            self.event,
            self.state,
            self.metric.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string()),
            if self.pulses.is_empty() { "-".to_string() } else { self.pulse_list() },
            self.display,
            self.subscribed,
            self.timer_pending,
            self.reason.code()
        )
    }

    fn pulse_list(&self) -> String {
        self.pulses
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_output() -> StepOutput {
        StepOutput {
            timestamp: Utc::now(),
            at_ms: 2000,
            event: "timer#1".to_string(),
            state: AlarmState::Armed,
            metric: None,
            reason: ReasonCode::R202_ALARM_PULSE,
            display: "Vibrating".to_string(),
            pulses: vec![VibePattern::Short],
            subscribed: false,
            timer_pending: true,
        }
    }

    #[test]
    fn test_parseable_string() {
        let line = sample_output().to_parseable_string();
        assert_eq!(
            line,
            "t=2000 | event=timer#1 | state=ARMED | deviation=- | vibe=short | display=Vibrating | subscribed=false | timer=true | reason=R202_ALARM_PULSE"
        );
    }

    #[test]
    fn test_terminal_string_mentions_reason() {
        colored::control::set_override(false);
        let line = sample_output().to_terminal_string();
        assert!(line.contains("ARMED"));
        assert!(line.contains("R202_ALARM_PULSE"));
        assert!(line.contains("vibe=short"));
    }
}
