//! Checkpoint simulation runner.
//!
//! Shows every scenario side by side in the terminal. Hold Space to arm the
//! signal and let go to release the traffic. `--headless` runs the scenarios
//! without a terminal, tapping the control whenever the light turns red.

use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use checkpoint_sim::{scenario, Board, Scenario, DEFAULT_INTERVAL, DEFAULT_SCENARIOS};
use clap::Parser;

mod headless;
mod term;

/// Car-following simulation at a signal-controlled checkpoint
#[derive(Parser, Debug)]
#[command(name = "checkpoint-sim")]
#[command(about = "Simulates platoons of cars released through a checkpoint signal")]
#[command(version)]
struct Args {
    /// JSON file holding an array of scenarios; the built-in six are used otherwise
    #[arg(long)]
    scenarios: Option<PathBuf>,

    /// Milliseconds between simulation ticks
    #[arg(long, default_value_t = DEFAULT_INTERVAL.as_millis() as u64)]
    interval_ms: u64,

    /// Run without a terminal UI
    #[arg(long)]
    headless: bool,

    /// Signal cycles to complete in headless mode
    #[arg(long, default_value_t = 3)]
    cycles: usize,

    /// Print one JSON frame per scenario per tick in headless mode
    #[arg(long)]
    json: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    init_logging(&args)?;

    let scenarios: Vec<Scenario> = match &args.scenarios {
        Some(path) => scenario::load(path)?,
        None => DEFAULT_SCENARIOS.to_vec(),
    };
    let period = Duration::from_millis(args.interval_ms);
    let mut board = Board::from_scenarios(&scenarios, period, Instant::now());
    log::info!("simulating {} scenarios", board.len());

    if args.headless {
        let stdout = io::stdout();
        headless::run(&mut board, args.cycles, args.json, &mut stdout.lock())
    } else {
        term::run(&mut board)?;
        Ok(())
    }
}

/// Logs go to the log file when one is given. Without one, the terminal UI
/// keeps logging off so it does not draw over the screen.
fn init_logging(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut builder = env_logger::Builder::from_default_env();
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if !args.headless => return Ok(()),
        None => {}
    }
    builder.try_init()?;
    Ok(())
}
