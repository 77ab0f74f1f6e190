//! Crout solver command line
//!
//! Loads a JSON system description, applies command-line overrides, solves,
//! and prints the factors, intermediate vectors and solution.
//!
//! Usage:
//!   cargo run --release --bin crout-solve -- --config system.json
//!   cargo run --release --bin crout-solve -- --config system.json --arithmetic interval-big --precision 60
//!
//! The exit code is the solver status: 0 solved, 1 bad input,
//! 2 non-finite result, 3 singular matrix.

use clap::Parser;
use math_crout_interval::{ArithmeticContext, BigFloat};
use math_crout_solvers::config::ModeChoice;
use math_crout_solvers::{Arithmetic, Structure, SystemConfig, run};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "crout-solve",
    about = "Solve A·x = b with non-pivoting Crout factorization"
)]
struct Args {
    /// JSON file describing the system
    #[arg(short, long)]
    config: PathBuf,

    /// Override the matrix structure
    #[arg(long, value_enum)]
    structure: Option<Structure>,

    /// Override the numeric representation
    #[arg(long, value_enum)]
    arithmetic: Option<Arithmetic>,

    /// Interval rounding mode
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Working precision in decimal digits (arbitrary-precision backends)
    #[arg(long)]
    precision: Option<usize>,

    /// Digits after the decimal point in printed values
    #[arg(long)]
    out_digits: Option<usize>,

    /// Write the effective configuration to this file
    #[arg(long)]
    save: Option<PathBuf>,
}

/// Merge command-line context overrides into the configured context
fn apply_overrides(config: &mut SystemConfig, args: &Args) -> Result<(), String> {
    if let Some(structure) = args.structure {
        config.structure = structure;
    }
    if let Some(arithmetic) = args.arithmetic {
        config.arithmetic = arithmetic;
    }
    if args.mode.is_none() && args.precision.is_none() && args.out_digits.is_none() {
        return Ok(());
    }

    let mut ctx = match (&config.context, config.arithmetic) {
        (Some(ctx), _) => ctx.clone(),
        (None, Arithmetic::Big | Arithmetic::IntervalBig) => {
            ArithmeticContext::initialize::<BigFloat>()
        }
        (None, _) => ArithmeticContext::initialize::<f64>(),
    };
    if let Some(mode) = args.mode {
        ctx.set_rounding_mode(mode.into());
    }
    if let Some(precision) = args.precision {
        ctx = ctx.with_precision(precision).map_err(|e| e.to_string())?;
    }
    if let Some(out_digits) = args.out_digits {
        ctx = ctx.with_out_digits(out_digits).map_err(|e| e.to_string())?;
    }
    config.context = Some(ctx);
    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let mut config = match SystemConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    };
    if let Err(err) = apply_overrides(&mut config, &args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
    log::info!(
        "loaded {:?} system in {:?} arithmetic from {}",
        config.structure,
        config.arithmetic,
        args.config.display()
    );

    if let Some(path) = &args.save {
        if let Err(err) = config.to_file(path) {
            eprintln!("Error: {err}");
            process::exit(1);
        }
        log::info!("effective configuration written to {}", path.display());
    }

    match run(&config) {
        Ok(report) => {
            print!("{}", report.text);
            process::exit(report.status.code());
        }
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(err.code());
        }
    }
}
