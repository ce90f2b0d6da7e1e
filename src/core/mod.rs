//! Core modules for Stillwatch

pub mod normalizer;
pub mod aggregator;
pub mod timer;
pub mod shell;
pub mod controller;
pub mod app;
pub mod script;
pub mod simulator;
pub mod runloop;

pub use normalizer::normalize;
pub use aggregator::BatchAggregator;
pub use timer::{TimerQueue, TimerService};
pub use shell::{RecordingShell, Shell, ShellCommand};
pub use controller::AlarmController;
pub use app::{App, AppEvent};
pub use script::{ScriptCommand, ScriptError, ScriptParser};
pub use simulator::{run_script, Simulator};
pub use runloop::{run_live, LiveEnd, LiveError, LiveEvent, LiveSummary};
