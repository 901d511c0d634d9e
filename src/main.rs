use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;
use tracing::Level;

use rtcheck::config::{DEFAULT_BATCH_SIZE, DEFAULT_TOOL, MAX_CASE_SIZE, MIN_CASE_SIZE};
use rtcheck::io_utils::{harness_cli_error, simple_cli_error};
use rtcheck::{Config, Harness, SystemDriver};

/// Round-trip an external compressor over batches of generated test files.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Compression tool invoked as `<tool> C|D <input> <output>`
    #[arg(long, default_value = DEFAULT_TOOL)]
    tool: PathBuf,
    /// Directory for generated test files
    #[arg(long, default_value = ".")]
    work_dir: PathBuf,
    /// Test cases per batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,
    /// Smallest generated file in bytes
    #[arg(long, default_value_t = MIN_CASE_SIZE)]
    min_size: usize,
    /// Largest generated file in bytes
    #[arg(long, default_value_t = MAX_CASE_SIZE)]
    max_size: usize,
    /// Fixed RNG seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,
    /// Print the session summary as JSON when done
    #[arg(long)]
    json: bool,
    /// Increase diagnostic output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = Config {
        tool: args.tool,
        work_dir: args.work_dir,
        batch_size: args.batch_size,
        min_size: args.min_size,
        max_size: args.max_size,
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut harness = Harness::new(config, SystemDriver, rng)
        .map_err(|e| harness_cli_error("invalid configuration", e))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = harness
        .run(&mut stdin.lock(), &mut stdout.lock())
        .map_err(|e| harness_cli_error("session aborted", e))?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| simple_cli_error(&format!("failed to encode summary: {e}")))?;
        println!("{json}");
    }
    Ok(())
}
