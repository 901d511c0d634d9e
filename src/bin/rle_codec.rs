use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use rtcheck::io_utils::{harness_cli_error, io_cli_error};
use rtcheck::rle;

/// Reference run-length codec speaking the harness tool contract.
#[derive(Parser)]
struct Args {
    /// C to compress, D to decompress
    #[arg(value_enum, ignore_case = true)]
    mode: CodecMode,
    /// Input file
    input: PathBuf,
    /// Output file
    output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum CodecMode {
    C,
    D,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let data =
        fs::read(&args.input).map_err(|e| io_cli_error("reading input file", &args.input, e))?;
    let out = match args.mode {
        CodecMode::C => rle::encode(&data),
        CodecMode::D => {
            rle::decode(&data).map_err(|e| harness_cli_error("decompression failed", e))?
        }
    };
    fs::write(&args.output, &out)
        .map_err(|e| io_cli_error("writing output file", &args.output, e))?;
    Ok(())
}
