//! Alarm state definitions

use serde::{Deserialize, Serialize};

/// The two states of the motion alarm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlarmState {
    /// Monitoring the accelerometer, no timer outstanding
    #[default]
    Idle,
    /// Alarm pulsing, sensor unsubscribed, one timer outstanding
    Armed,
}

impl AlarmState {
    /// Get emoji for state
    pub fn emoji(&self) -> &'static str {
        match self {
            AlarmState::Idle => "👀",
            AlarmState::Armed => "📳",
        }
    }
}

impl std::fmt::Display for AlarmState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AlarmState::Idle => "IDLE",
            AlarmState::Armed => "ARMED",
        };
        write!(f, "{}", name)
    }
}

/// Which build of the app is running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    /// Buttons echo text and vibration patterns; every batch pulses
    Feedback,
    /// Deviation detector with repeating alarm
    #[default]
    Motion,
}

impl std::fmt::Display for AppMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppMode::Feedback => write!(f, "feedback"),
            AppMode::Motion => write!(f, "motion"),
        }
    }
}

impl std::str::FromStr for AppMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "feedback" => Ok(AppMode::Feedback),
            "motion" => Ok(AppMode::Motion),
            other => Err(format!("unknown mode '{}' (expected feedback or motion)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_serializes_screaming() {
        assert_eq!(serde_json::to_string(&AlarmState::Armed).unwrap(), "\"ARMED\"");
        assert_eq!(AlarmState::default(), AlarmState::Idle);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Feedback".parse::<AppMode>(), Ok(AppMode::Feedback));
        assert_eq!("motion".parse::<AppMode>(), Ok(AppMode::Motion));
        assert!("tilt".parse::<AppMode>().is_err());
    }
}
