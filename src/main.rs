//! Stillwatch host simulator
//!
//! Usage:
//!   stillwatch --script demo.watch           # Run a script on virtual time
//!   stillwatch --interactive                 # Live mode, commands on stdin
//!   stillwatch --script demo.watch --json    # JSON output, one line per event
//!   stillwatch --mode feedback -i            # First build: button echo only

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use stillwatch::core::{run_live, run_script, LiveEnd, LiveEvent};
use stillwatch::types::{AppConfig, AppMode, ReasonCode, StepOutput};
use stillwatch::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "stillwatch",
    version = VERSION,
    about = "Stillwatch - motion alarm simulator for a wrist wearable",
    long_about = "Stillwatch averages each accelerometer batch, takes the largest\n\
                  per-axis deviation from the averages, and arms a repeating\n\
                  vibration alarm when it exceeds the threshold.\n\n\
                  Commands (script file or stdin):\n  \
                  still [n]        batch of identical samples\n  \
                  shake [n]        batch of alternating extremes (deviation 2000)\n  \
                  batch x,y,z ...  explicit batch, suffix '!' = taken during vibration\n  \
                  wait <ms>        let time pass, firing due timers\n  \
                  up|select|down   button press (select dismisses the alarm)\n  \
                  quit             stop\n\n\
                  States:\n  \
                  IDLE   - Reading Accel, sensor subscribed\n  \
                  ARMED  - Vibrating, sensor unsubscribed"
)]
struct Args {
    /// Script file to run on virtual time
    #[arg(short, long)]
    script: Option<String>,

    /// Live mode - read commands from stdin, timers in real time
    #[arg(short, long)]
    interactive: bool,

    /// JSON config file (missing fields use built-in defaults)
    #[arg(short, long)]
    config: Option<String>,

    /// App build: feedback or motion
    #[arg(long)]
    mode: Option<AppMode>,

    /// Deviation above which the alarm arms
    #[arg(long)]
    threshold: Option<u16>,

    /// Interval between alarm pulses (ms)
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Delay before listening to the sensor again after dismissal (ms)
    #[arg(long)]
    resubscribe_delay_ms: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(2);
        }
    };

    let ok = match args.script {
        Some(ref path) if !args.interactive => run_script_file(path, config, &args),
        _ => run_interactive(config, &args).await,
    };

    if !ok {
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "stillwatch=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Defaults < config file < command-line flags
fn load_config(args: &Args) -> Result<AppConfig, stillwatch::types::ConfigError> {
    let mut config = match args.config {
        Some(ref path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(threshold) = args.threshold {
        config.deviation_threshold = threshold;
    }
    if let Some(interval) = args.interval_ms {
        config.alarm_interval_ms = interval;
    }
    if let Some(delay) = args.resubscribe_delay_ms {
        config.resubscribe_delay_ms = delay;
    }
    config.validate()?;
    Ok(config)
}

/// Run a script file on virtual time
fn run_script_file(path: &str, config: AppConfig, args: &Args) -> bool {
    let script = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} cannot read {}: {}", "error:".red().bold(), path, e);
            return false;
        }
    };

    if !args.json {
        print_header("Script", &config, args.no_color);
    }

    let outputs = match run_script(config, &script) {
        Ok(outputs) => outputs,
        Err(e) => {
            eprintln!("{} {}: {}", "error:".red().bold(), path, e);
            return false;
        }
    };

    for out in &outputs {
        print_output(out, args);
    }
    if !args.json {
        print_summary(&outputs);
    }
    true
}

/// Live mode on stdin
async fn run_interactive(config: AppConfig, args: &Args) -> bool {
    if !args.json {
        print_header("Live", &config, args.no_color);
        println!("Type commands and press Enter. Type 'quit' to exit.");
        println!();
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut outputs = Vec::new();
    let result = run_live(config, stdin, |event| match event {
        LiveEvent::Output(out) => {
            print_output(out, args);
            outputs.push(out.clone());
        }
        LiveEvent::Rejected(err) => {
            eprintln!("{} {}", "⚠".yellow(), err);
        }
    })
    .await;

    match result {
        Ok(summary) => {
            if !args.json {
                let how = match summary.ended_by {
                    LiveEnd::Eof => "input closed",
                    LiveEnd::Quit => "quit",
                };
                println!();
                println!(
                    "Session ended ({}). Events: {} | Rejected lines: {} | Ran {:.1}s",
                    how,
                    summary.events,
                    summary.rejected,
                    summary.elapsed_ms as f64 / 1000.0
                );
                print_summary(&outputs);
            }
            true
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            false
        }
    }
}

fn print_header(mode: &str, config: &AppConfig, no_color: bool) {
    let title = format!("  Stillwatch v{} - {} ({} build)", VERSION, mode, config.mode);
    println!("========================================");
    if no_color {
        println!("{}", title);
    } else {
        println!("{}", title.bold());
    }
    println!("========================================");
    println!(
        "threshold={} interval={}ms resubscribe_delay={}ms batch={}@{}Hz",
        config.deviation_threshold,
        config.alarm_interval_ms,
        config.resubscribe_delay_ms,
        config.batch_size,
        config.sampling_rate_hz
    );
    println!();
}

fn print_output(out: &StepOutput, args: &Args) {
    if args.json {
        match serde_json::to_string(out) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
        }
    } else if args.no_color {
        println!("{}", out.to_parseable_string());
    } else {
        println!("{}", out.to_terminal_string());
        print_transition_message(out);
    }
}

/// Print state transition messages
fn print_transition_message(out: &StepOutput) {
    if !out.reason.is_transition() {
        return;
    }
    match out.reason {
        ReasonCode::R201_ALARM_ARMED => {
            println!("{}", "  ⚠ Movement detected - press SELECT to dismiss".red());
        }
        ReasonCode::R203_ALARM_DISMISSED if !out.subscribed => {
            println!("{}", "  ✓ Alarm dismissed - sensor resumes shortly".green());
        }
        _ => {
            println!("{}", "  ✓ Monitoring".green());
        }
    }
}

fn print_summary(outputs: &[StepOutput]) {
    let pulses: usize = outputs.iter().map(|o| o.pulses.len()).sum();
    let arms = outputs
        .iter()
        .filter(|o| o.reason == ReasonCode::R201_ALARM_ARMED)
        .count();
    let final_state = outputs.last().map(|o| o.state).unwrap_or_default();
    println!();
    println!(
        "Events: {} | Alarms armed: {} | Pulses: {} | Final state: {}",
        outputs.len(),
        arms,
        pulses,
        final_state
    );
}
