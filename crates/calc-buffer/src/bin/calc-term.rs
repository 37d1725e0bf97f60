//! calc-term: terminal front-end for calc-buffer
//!
//! ## Usage
//!
//! ```bash
//! calc-term                         # Interactive keypad
//! calc-term --config calc.json      # Custom buffer size and markers
//! calc-term --eval "2+3*4"          # Evaluate once and print the display
//! RUST_LOG=calc_buffer=debug calc-term --eval "5/0"
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use calc_buffer::config::{ConfigError, EngineConfig};
use calc_buffer::engine::ExpressionEngine;
use calc_buffer::tui::{run, CalculatorApp};
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Keypad calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "calc-term")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON engine configuration
    #[arg(short, long, env = "CALC_BUFFER_CONFIG")]
    config: Option<PathBuf>,

    /// Evaluate an expression, print the display text and exit
    #[arg(short, long, value_name = "EXPR")]
    eval: Option<String>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    if let Some(expr) = &cli.eval {
        let mut engine = ExpressionEngine::with_config(config)?;
        let _ = engine.set_expression(expr);
        let _ = engine.evaluate();
        println!("{}", engine.display());
        return Ok(());
    }

    let mut app = CalculatorApp::with_config(config)?;
    run(&mut app)?;
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the verbosity flags.
///
/// The interactive screen owns the terminal, so it stays silent unless
/// asked otherwise.
fn init_logging(cli: &Cli) {
    let interactive = cli.eval.is_none() && !cli.print_config;
    let default_filter = match (cli.verbose, interactive) {
        (0, true) => "off",
        (0, false) => "warn",
        (1, _) => "calc_buffer=debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
