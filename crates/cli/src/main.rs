//! curvetab - Curve-to-Table Generator CLI
//!
//! Edits control-point curve documents and turns them into fixed-size
//! integer lookup tables emitted as C header and source files.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use curvetab_core::CurveError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::CurveArgs;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "curvetab")]
#[command(about = "Curve-to-Table Generator - Turn spline curves into C lookup tables")]
#[command(version)]
#[command(long_about = "
curvetab fits a natural cubic spline through a handful of control points,
samples it into integer lookup tables of 128 to 1024 entries and emits a C
header and source defining the table and a masked access macro.

Curves are stored as JSON documents and can be overridden from the command line.
Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a new curve document with points at the midpoint
    Init {
        #[command(flatten)]
        source: CurveArgs,
        /// Document path to create
        #[arg(short, long)]
        output: PathBuf,
        /// Overwrite an existing document
        #[arg(short, long)]
        force: bool,
    },

    /// Move one control point in a stored document
    Set {
        /// Curve document to modify
        #[arg(short, long)]
        curve: PathBuf,
        /// Control point index
        index: usize,
        /// New value, clamped to the curve bounds
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Reset every control point in a stored document to the midpoint
    Reset {
        /// Curve document to modify
        #[arg(short, long)]
        curve: PathBuf,
    },

    /// Print the quantized table as (index, value) pairs
    Preview {
        #[command(flatten)]
        source: CurveArgs,
    },

    /// Write <name>.h and <name>.c for the table
    Generate {
        #[command(flatten)]
        source: CurveArgs,
        /// Directory to write into (default: current directory)
        #[arg(short, long, conflicts_with = "stdout")]
        out_dir: Option<PathBuf>,
        /// Print the generated files instead of writing them
        #[arg(long)]
        stdout: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("curvetab={log_level},curvetab_core={log_level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Map an error to the process exit code.
fn exit_code(error: &anyhow::Error) -> u8 {
    if let Some(err) = error.downcast_ref::<CurveError>() {
        return match err {
            CurveError::IndexOutOfRange { .. } => 3,
            CurveError::SingularSystem => 1,
            _ => 4,
        };
    }
    match error.downcast_ref::<CliError>() {
        Some(CliError::InvalidDocument { .. }) | Some(CliError::JsonError(_)) => 4,
        _ => 1,
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Init {
            source,
            output,
            force,
        } => commands::edit::init(source, output, *force, cli.json),
        Commands::Set {
            curve,
            index,
            value,
        } => commands::edit::set(curve, *index, *value, cli.json),
        Commands::Reset { curve } => commands::edit::reset(curve, cli.json),
        Commands::Preview { source } => commands::preview::execute(source, cli.json),
        Commands::Generate {
            source,
            out_dir,
            stdout,
        } => commands::generate::execute(source, out_dir.as_deref(), *stdout, cli.json),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}
