//! Device-facing primitives: buttons, vibration patterns, timer handles

use serde::{Deserialize, Serialize};

/// Hardware buttons on the right edge of the watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Up,
    Select,
    Down,
}

impl std::fmt::Display for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Button::Up => "up",
            Button::Select => "select",
            Button::Down => "down",
        };
        write!(f, "{}", name)
    }
}

/// Built-in vibration patterns of the motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VibePattern {
    Short,
    Long,
    Double,
}

impl std::fmt::Display for VibePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VibePattern::Short => "short",
            VibePattern::Long => "long",
            VibePattern::Double => "double",
        };
        write!(f, "{}", name)
    }
}

/// Opaque id of one timer registration. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

impl std::fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}
