//! Host simulator: deterministic run loop on virtual time
//!
//! Batches and buttons are delivered at the current virtual time. `wait`
//! moves the clock forward and delivers every timer that falls due inside
//! the window, earliest first, each as its own event.

use tracing::debug;

use crate::core::{App, AppEvent, RecordingShell, ScriptCommand, ScriptError, ScriptParser};
use crate::types::{AppConfig, StepOutput};

/// Scripted driver around an [`App`] with a recording shell
#[derive(Debug)]
pub struct Simulator {
    app: App<RecordingShell>,
    outputs: Vec<StepOutput>,
    stopped: bool,
}

impl Simulator {
    /// Create the app and run its start handler
    pub fn new(config: AppConfig) -> Self {
        let mut app = App::new(config, RecordingShell::new());
        let start = app.start();
        Self {
            app,
            outputs: vec![start],
            stopped: false,
        }
    }

    /// Apply commands in order until the end or a `quit`
    pub fn run(&mut self, commands: impl IntoIterator<Item = ScriptCommand>) -> &[StepOutput] {
        for command in commands {
            if self.stopped {
                break;
            }
            self.apply(command);
        }
        &self.outputs
    }

    /// Apply one command, returning the outputs it produced
    pub fn apply(&mut self, command: ScriptCommand) -> Vec<StepOutput> {
        let produced = match command {
            ScriptCommand::Button(button) => vec![self.app.handle(AppEvent::Button(button))],
            ScriptCommand::Batch(batch) => vec![self.app.handle(AppEvent::Accel(batch))],
            ScriptCommand::Wait(ms) => self.advance(ms),
            ScriptCommand::Quit => {
                self.stopped = true;
                Vec::new()
            }
        };
        self.outputs.extend(produced.iter().cloned());
        produced
    }

    /// Move virtual time forward by `ms`, firing due timers in order
    pub fn advance(&mut self, ms: u64) -> Vec<StepOutput> {
        let target = self.app.timers().now_ms().saturating_add(ms);
        let mut fired = Vec::new();
        while let Some(handle) = self.app.timers_mut().pop_due(target) {
            debug!(%handle, "timer due");
            fired.push(self.app.handle(AppEvent::Timer(handle)));
        }
        self.app.timers_mut().advance_to(target);
        fired
    }

    pub fn app(&self) -> &App<RecordingShell> {
        &self.app
    }

    /// Every output so far, start included
    pub fn outputs(&self) -> &[StepOutput] {
        &self.outputs
    }

    pub fn into_outputs(self) -> Vec<StepOutput> {
        self.outputs
    }

    /// A `quit` command was applied
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.app.timers().now_ms()
    }
}

/// Parse and run a whole script
pub fn run_script(config: AppConfig, script: &str) -> Result<Vec<StepOutput>, ScriptError> {
    let commands = ScriptParser::new(config.batch_size).parse(script)?;
    let mut sim = Simulator::new(config);
    sim.run(commands);
    Ok(sim.into_outputs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AlarmState, ReasonCode, VibePattern};

    #[test]
    fn test_wait_fires_each_pulse() {
        let outputs = run_script(AppConfig::default(), "shake\nwait 3500").unwrap();
        let reasons: Vec<_> = outputs.iter().map(|o| o.reason).collect();
        assert_eq!(
            reasons,
            vec![
                ReasonCode::R204_MONITORING_STARTED,
                ReasonCode::R201_ALARM_ARMED,
                ReasonCode::R202_ALARM_PULSE,
                ReasonCode::R202_ALARM_PULSE,
                ReasonCode::R202_ALARM_PULSE,
            ]
        );
        let times: Vec<_> = outputs[2..].iter().map(|o| o.at_ms).collect();
        assert_eq!(times, vec![1000, 2000, 3000]);
    }

    #[test]
    fn test_clock_lands_on_target() {
        let mut sim = Simulator::new(AppConfig::default());
        sim.apply(ScriptCommand::Wait(250));
        assert_eq!(sim.now_ms(), 250);
        assert!(sim.outputs().len() == 1);
    }

    #[test]
    fn test_quit_stops_run() {
        let mut sim = Simulator::new(AppConfig::default());
        let commands = ScriptParser::default().parse("shake\nquit\nselect").unwrap();
        sim.run(commands);
        assert!(sim.is_stopped());
        assert_eq!(sim.app().state(), AlarmState::Armed);
    }

    #[test]
    fn test_no_pulse_after_dismiss() {
        let outputs = run_script(AppConfig::default(), "shake\nwait 1000\nselect\nwait 5000").unwrap();
        let pulses: Vec<VibePattern> = outputs.iter().flat_map(|o| o.pulses.clone()).collect();
        assert_eq!(pulses, vec![VibePattern::Long]);
        assert_eq!(outputs.last().map(|o| o.reason), Some(ReasonCode::R203_ALARM_DISMISSED));
    }
}
