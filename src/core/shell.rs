//! Presentation shell: what the core drives on the device
//!
//! Display, vibration motor and accelerometer subscription are owned by the
//! host toolkit. The core only issues fire-and-forget commands through
//! [`Shell`].

use serde::{Deserialize, Serialize};

use crate::types::VibePattern;

/// Device surface the controller talks to
pub trait Shell {
    /// Replace the text of the status label
    fn set_text(&mut self, text: &str);

    /// Run one vibration pattern
    fn vibrate(&mut self, pattern: VibePattern);

    /// Start batch delivery from the accelerometer
    fn subscribe_accel(&mut self, batch_size: usize, sampling_rate_hz: u32);

    /// Stop batch delivery
    fn unsubscribe_accel(&mut self);
}

/// One command issued to the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShellCommand {
    SetText { text: String },
    Vibrate { pattern: VibePattern },
    Subscribe { batch_size: usize, sampling_rate_hz: u32 },
    Unsubscribe,
}

/// Shell that records commands and tracks the resulting device state
#[derive(Debug, Default, Clone)]
pub struct RecordingShell {
    commands: Vec<ShellCommand>,
    display: String,
    subscribed: bool,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current label text
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Every command since creation or the last [`take_commands`](Self::take_commands)
    pub fn commands(&self) -> &[ShellCommand] {
        &self.commands
    }

    /// Drain recorded commands, keeping display and subscription state
    pub fn take_commands(&mut self) -> Vec<ShellCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Vibration patterns among the recorded commands
    pub fn pulses(&self) -> Vec<VibePattern> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                ShellCommand::Vibrate { pattern } => Some(*pattern),
                _ => None,
            })
            .collect()
    }
}

impl Shell for RecordingShell {
    fn set_text(&mut self, text: &str) {
        self.display = text.to_string();
        self.commands.push(ShellCommand::SetText { text: text.to_string() });
    }

    fn vibrate(&mut self, pattern: VibePattern) {
        self.commands.push(ShellCommand::Vibrate { pattern });
    }

    fn subscribe_accel(&mut self, batch_size: usize, sampling_rate_hz: u32) {
        self.subscribed = true;
        self.commands.push(ShellCommand::Subscribe { batch_size, sampling_rate_hz });
    }

    fn unsubscribe_accel(&mut self) {
        self.subscribed = false;
        self.commands.push(ShellCommand::Unsubscribe);
    }
}
