//! Core types for Stillwatch

mod config;
mod device;
mod metric;
mod output;
mod reason;
mod sample;
mod state;

pub use config::{AppConfig, ConfigError};
pub use device::{Button, TimerHandle, VibePattern};
pub use metric::{BatchVerdict, DeviationMetric};
pub use output::StepOutput;
pub use reason::ReasonCode;
pub use sample::{AccelBatch, AccelSample};
pub use state::{AlarmState, AppMode};
