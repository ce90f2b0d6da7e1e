//! Integration tests for Slice 5 - Live run loop
//!
//! Runs on paused tokio time so timer fires land on exact milliseconds.

use stillwatch::core::{run_live, LiveEnd, LiveEvent};
use stillwatch::types::{AlarmState, AppConfig, ReasonCode, StepOutput};
use tokio::io::BufReader;

async fn drive(config: AppConfig, input: &str) -> (Vec<StepOutput>, usize, LiveEnd) {
    let mut outputs = Vec::new();
    let mut errors = 0;
    let summary = run_live(config, BufReader::new(input.as_bytes()), |event| match event {
        LiveEvent::Output(out) => outputs.push(out.clone()),
        LiveEvent::Rejected(_) => errors += 1,
    })
    .await
    .unwrap();
    assert_eq!(summary.rejected, errors);
    (outputs, errors, summary.ended_by)
}

#[tokio::test(start_paused = true)]
async fn test_eof_ends_loop() {
    let (outputs, errors, end) = drive(AppConfig::default(), "still\n").await;
    assert_eq!(end, LiveEnd::Eof);
    assert_eq!(errors, 0);
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[1].reason, ReasonCode::R102_BELOW_THRESHOLD);
}

#[tokio::test(start_paused = true)]
async fn test_alarm_pulses_in_real_time() {
    let (outputs, _, end) = drive(AppConfig::default(), "shake\nwait 3500\nselect\nquit\n").await;
    assert_eq!(end, LiveEnd::Quit);

    let reasons: Vec<_> = outputs.iter().map(|o| o.reason).collect();
    assert_eq!(
        reasons,
        vec![
            ReasonCode::R204_MONITORING_STARTED,
            ReasonCode::R201_ALARM_ARMED,
            ReasonCode::R202_ALARM_PULSE,
            ReasonCode::R202_ALARM_PULSE,
            ReasonCode::R202_ALARM_PULSE,
            ReasonCode::R203_ALARM_DISMISSED,
        ]
    );
    let pulse_times: Vec<_> = outputs[2..5].iter().map(|o| o.at_ms).collect();
    assert_eq!(pulse_times, vec![1000, 2000, 3000]);
    assert_eq!(outputs.last().map(|o| o.state), Some(AlarmState::Idle));
}

#[tokio::test(start_paused = true)]
async fn test_no_pulse_after_dismiss_while_waiting() {
    let (outputs, _, _) = drive(AppConfig::default(), "shake\nwait 1500\nselect\nwait 10000\n").await;
    let pulses: usize = outputs.iter().map(|o| o.pulses.len()).sum();
    assert_eq!(pulses, 1);
    assert_eq!(outputs.last().map(|o| o.reason), Some(ReasonCode::R203_ALARM_DISMISSED));
}

#[tokio::test(start_paused = true)]
async fn test_bad_lines_are_reported_and_skipped() {
    let (outputs, errors, end) = drive(AppConfig::default(), "wiggle\nbatch 1,2\nselect\nexit\n").await;
    assert_eq!(errors, 2);
    assert_eq!(end, LiveEnd::Quit);
    assert_eq!(outputs.last().map(|o| o.reason), Some(ReasonCode::R203_DISMISS_WHILE_IDLE));
}

#[tokio::test(start_paused = true)]
async fn test_quit_stops_before_pending_timers() {
    let (outputs, _, end) = drive(AppConfig::default(), "shake\nquit\n").await;
    assert_eq!(end, LiveEnd::Quit);
    assert!(outputs.iter().all(|o| o.pulses.is_empty()));
    assert!(outputs.last().map(|o| o.timer_pending).unwrap_or(false));
}
