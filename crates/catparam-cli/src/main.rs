//! catparam CLI entry point.
//!
//! Provides command-line tools for working with catalog entry files:
//! - `catparam check` - Validate entry files and their defaults
//! - `catparam params` - List an entry's user parameters
//! - `catparam resolve` - Resolve an entry into driver keyword arguments

mod commands;
mod output;
mod source;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{run_check, run_params, run_resolve, CheckArgs, ParamsArgs, ResolveArgs};
use tracing_subscriber::EnvFilter;

/// Catalog entry parameter tools.
#[derive(Debug, Parser)]
#[command(name = "catparam")]
#[command(about = "Catalog entry parameter tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(
        long,
        value_enum,
        default_value_t = ColorWhen::Auto,
        global = true,
        env = "CATPARAM_COLOR"
    )]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable environment variable lookups in loaded entries
    #[arg(long, global = true)]
    pub no_env: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check entry files and their parameter defaults
    Check(CheckArgs),
    /// List the user parameters of an entry
    Params(ParamsArgs),
    /// Resolve an entry into the arguments passed to its driver
    Resolve(ResolveArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Install the log subscriber. `RUST_LOG` wins over `--verbose`.
fn setup_logging(verbose: bool) {
    let default = if verbose { "catparam=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Check(args) => run_check(args, cli.no_env),
        Commands::Params(args) => run_params(args, cli.no_env),
        Commands::Resolve(args) => run_resolve(args, cli.no_env),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
