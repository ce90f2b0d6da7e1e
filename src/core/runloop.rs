//! Live run loop: real-time timers, commands from an async line source
//!
//! One event at a time: each `select!` round handles either the earliest
//! due timer, the end of a `wait`, or one input line, never two at once.
//! Timers win ties so an alarm pulse is never starved by input.

use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use crate::core::{App, AppEvent, RecordingShell, ScriptCommand, ScriptError, ScriptParser};
use crate::types::{AppConfig, StepOutput};

/// What the loop reports to its caller
#[derive(Debug)]
pub enum LiveEvent<'a> {
    /// An event was handled
    Output(&'a StepOutput),
    /// An input line did not parse; the loop keeps going
    Rejected(&'a ScriptError),
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveEnd {
    /// Input closed
    Eof,
    /// `quit` or `exit`
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveSummary {
    pub ended_by: LiveEnd,
    /// Events handled, start included
    pub events: u64,
    /// Input lines rejected by the parser
    pub rejected: usize,
    /// Run time in milliseconds when the loop stopped
    pub elapsed_ms: u64,
}

#[derive(Debug, Error)]
pub enum LiveError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

fn elapsed_ms(origin: Instant) -> u64 {
    origin.elapsed().as_millis() as u64
}

/// Sleep until `origin + due` and return `due`; never resolves for `None`
async fn sleep_until_ms(origin: Instant, due: Option<u64>) -> u64 {
    match due {
        Some(ms) => {
            sleep_until(origin + Duration::from_millis(ms)).await;
            ms
        }
        None => std::future::pending().await,
    }
}

/// Run the app against `input` until EOF or `quit`, reporting through `sink`
pub async fn run_live<R, F>(config: AppConfig, input: R, mut sink: F) -> Result<LiveSummary, LiveError>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(LiveEvent<'_>),
{
    let origin = Instant::now();
    let parser = ScriptParser::new(config.batch_size);
    let mut app = App::new(config, RecordingShell::new());
    let mut lines = input.lines();
    let mut line_no = 0usize;
    let mut rejected = 0usize;
    // input is not read while a `wait` is in progress
    let mut paused_until: Option<u64> = None;

    let out = app.start();
    sink(LiveEvent::Output(&out));

    let ended_by = loop {
        let next_due = app.timers().next_due();

        tokio::select! {
            biased;

            due = sleep_until_ms(origin, next_due) => {
                let now = elapsed_ms(origin).max(due);
                while let Some(handle) = app.timers_mut().pop_due(now) {
                    let out = app.handle(AppEvent::Timer(handle));
                    sink(LiveEvent::Output(&out));
                }
                app.timers_mut().advance_to(now);
            }

            _ = sleep_until_ms(origin, paused_until), if paused_until.is_some() => {
                debug!("wait finished");
                paused_until = None;
            }

            line = lines.next_line(), if paused_until.is_none() => {
                let Some(text) = line? else {
                    break LiveEnd::Eof;
                };
                line_no += 1;
                let now = elapsed_ms(origin);
                app.timers_mut().advance_to(now);

                match parser.parse_line(line_no, &text) {
                    Ok(None) => {}
                    Ok(Some(ScriptCommand::Quit)) => break LiveEnd::Quit,
                    Ok(Some(ScriptCommand::Wait(ms))) => {
                        paused_until = Some(now.saturating_add(ms));
                    }
                    Ok(Some(ScriptCommand::Button(button))) => {
                        let out = app.handle(AppEvent::Button(button));
                        sink(LiveEvent::Output(&out));
                    }
                    Ok(Some(ScriptCommand::Batch(batch))) => {
                        let out = app.handle(AppEvent::Accel(batch));
                        sink(LiveEvent::Output(&out));
                    }
                    Err(err) => {
                        warn!(%err, "input line rejected");
                        rejected += 1;
                        sink(LiveEvent::Rejected(&err));
                    }
                }
            }
        }
    };

    Ok(LiveSummary {
        ended_by,
        events: app.event_count(),
        rejected,
        elapsed_ms: elapsed_ms(origin),
    })
}
