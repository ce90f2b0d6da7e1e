//! Script parser: line-oriented event language for the host simulator
//!
//! ```text
//! # comment
//! still            # one batch of identical samples
//! shake 4          # alternating extremes, deviation 2000
//! batch 0,0,-1000 12,-8,-990!   # '!' = taken during vibration
//! wait 3000        # advance time, firing due timers
//! select           # up | select | down
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::types::{AccelBatch, AccelSample, Button};
use crate::MAX_BATCH_SAMPLES;

lazy_static! {
    static ref RE_BUTTON: Regex = Regex::new(r"(?i)^(up|select|down)$").unwrap();
    static ref RE_WAIT: Regex = Regex::new(r"(?i)^wait\s+(\d+)\s*(?:ms)?$").unwrap();
    static ref RE_PRESET: Regex = Regex::new(r"(?i)^(still|shake)(?:\s+(\d+))?$").unwrap();
    static ref RE_BATCH: Regex = Regex::new(r"(?i)^batch\s+(.+)$").unwrap();
    static ref RE_SAMPLE: Regex = Regex::new(r"^([+-]?\d+),([+-]?\d+),([+-]?\d+)(!)?$").unwrap();
    static ref RE_QUIT: Regex = Regex::new(r"(?i)^(quit|exit)$").unwrap();
}

/// Resting wrist, face up
const STILL_SAMPLE: AccelSample = AccelSample { x: 0, y: 0, z: -1000, did_vibrate: false };
const SHAKE_LOW: AccelSample = AccelSample { x: -4000, y: -4000, z: -4000, did_vibrate: false };
const SHAKE_HIGH: AccelSample = AccelSample { x: 0, y: 0, z: 0, did_vibrate: false };

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Button(Button),
    Wait(u64),
    Batch(AccelBatch),
    Quit,
}

/// Parse failures, with 1-based line numbers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{text}'")]
    UnknownCommand { line: usize, text: String },

    #[error("line {line}: malformed sample '{token}' (expected x,y,z or x,y,z!)")]
    MalformedSample { line: usize, token: String },

    #[error("line {line}: axis value out of range in '{token}'")]
    OutOfRange { line: usize, token: String },

    #[error("line {line}: number too large in '{text}'")]
    NumberTooLarge { line: usize, text: String },
}

/// Parser for the event language
#[derive(Debug, Clone, Copy)]
pub struct ScriptParser {
    /// Samples in a `still`/`shake` batch without explicit count
    batch_size: usize,
}

impl ScriptParser {
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size }
    }

    /// Parse a whole script, skipping blanks and comments
    pub fn parse(&self, script: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
        let mut commands = Vec::new();
        for (idx, line) in script.lines().enumerate() {
            if let Some(command) = self.parse_line(idx + 1, line)? {
                commands.push(command);
            }
        }
        Ok(commands)
    }

    /// Parse one line. `Ok(None)` for blank and comment-only lines.
    pub fn parse_line(&self, line_no: usize, line: &str) -> Result<Option<ScriptCommand>, ScriptError> {
        let text = match line.split_once('#') {
            Some((before, _)) => before,
            None => line,
        }
        .trim();

        if text.is_empty() {
            return Ok(None);
        }

        if let Some(caps) = RE_BUTTON.captures(text) {
            let button = match caps[1].to_ascii_lowercase().as_str() {
                "up" => Button::Up,
                "down" => Button::Down,
                _ => Button::Select,
            };
            return Ok(Some(ScriptCommand::Button(button)));
        }

        if let Some(caps) = RE_WAIT.captures(text) {
            let ms = parse_count::<u64>(&caps[1], line_no, text)?;
            return Ok(Some(ScriptCommand::Wait(ms)));
        }

        if let Some(caps) = RE_PRESET.captures(text) {
            let count = match caps.get(2) {
                Some(m) => parse_count::<usize>(m.as_str(), line_no, text)?,
                None => self.batch_size,
            };
            if count > MAX_BATCH_SAMPLES {
                return Err(ScriptError::NumberTooLarge { line: line_no, text: text.to_string() });
            }
            let batch = if caps[1].eq_ignore_ascii_case("still") {
                AccelBatch::repeat(STILL_SAMPLE, count)
            } else {
                (0..count)
                    .map(|i| if i % 2 == 0 { SHAKE_LOW } else { SHAKE_HIGH })
                    .collect::<Vec<_>>()
                    .into()
            };
            return Ok(Some(ScriptCommand::Batch(batch)));
        }

        if let Some(caps) = RE_BATCH.captures(text) {
            if caps[1].split_whitespace().count() > MAX_BATCH_SAMPLES {
                return Err(ScriptError::NumberTooLarge { line: line_no, text: text.to_string() });
            }
            let samples = caps[1]
                .split_whitespace()
                .map(|token| parse_sample(token, line_no))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Some(ScriptCommand::Batch(AccelBatch::new(samples))));
        }

        if RE_QUIT.is_match(text) {
            return Ok(Some(ScriptCommand::Quit));
        }

        Err(ScriptError::UnknownCommand { line: line_no, text: text.to_string() })
    }
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self::new(crate::BATCH_SIZE)
    }
}

fn parse_count<T: std::str::FromStr>(digits: &str, line: usize, text: &str) -> Result<T, ScriptError> {
    digits
        .parse::<T>()
        .map_err(|_| ScriptError::NumberTooLarge { line, text: text.to_string() })
}

fn parse_sample(token: &str, line: usize) -> Result<AccelSample, ScriptError> {
    let caps = RE_SAMPLE
        .captures(token)
        .ok_or_else(|| ScriptError::MalformedSample { line, token: token.to_string() })?;

    let axis = |i: usize| {
        caps[i]
            .parse::<i16>()
            .map_err(|_| ScriptError::OutOfRange { line, token: token.to_string() })
    };

    Ok(AccelSample {
        x: axis(1)?,
        y: axis(2)?,
        z: axis(3)?,
        did_vibrate: caps.get(4).is_some(),
    })
}
