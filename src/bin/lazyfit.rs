//! Command-line runner for lazyfit problem files.
//!
//! Reads a JSON problem, solves it once as a warm-up and once timed, and
//! writes `{"time-seconds": .., "output": .., "dry-output": ..}`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --features cli --bin lazyfit -- covariance input.json output.json
//! RUST_LOG=debug cargo run --release --features cli --bin lazyfit -- circle input.json output.json
//! ```

use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use lazyfit::problem::{run, CircleProblem, CovarianceProblem, Problem, ProblemFile};
use log::info;

#[derive(Parser)]
#[command(name = "lazyfit", about = "Run covariance and circle-fit problem files")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Sample covariance of {"dim", "data"}
    Covariance {
        /// Input problem JSON
        input: PathBuf,
        /// Output report JSON
        output: PathBuf,
    },
    /// Gradient-descent circle fit of {"settings", "init-params", "points"}
    Circle {
        /// Input problem JSON
        input: PathBuf,
        /// Output report JSON
        output: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Cmd::Covariance { input, output } => solve_file::<CovarianceProblem>(&input, &output),
        Cmd::Circle { input, output } => solve_file::<CircleProblem>(&input, &output),
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn solve_file<P: Problem>(input: &Path, output: &Path) -> Result<(), Box<dyn Error>> {
    info!("Loading {} problem from {}", P::NAME, input.display());
    let file: ProblemFile<P> = serde_json::from_reader(BufReader::new(File::open(input)?))?;
    let problem = file.into_problem();

    let report = run(&problem)?;
    info!("Solved in {:.6} s", report.time_seconds);

    let mut writer = BufWriter::new(File::create(output)?);
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!("Wrote {}", output.display());
    Ok(())
}
