//! Implementation of the `catparam check` command.

use std::path::PathBuf;

use catparam::{Arguments, ProcessEnv};
use miette::miette;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use super::load_entry;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Entry files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    file: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the check command.
///
/// Each file is loaded and resolved once with no overrides, so defaults that
/// only fail when evaluated are reported too.
pub fn run_check(args: CheckArgs, no_env: bool) -> miette::Result<i32> {
    let mut results = Vec::with_capacity(args.files.len());

    for path in &args.files {
        let file = path.display().to_string();
        let outcome = load_entry(path, no_env).and_then(|entry| {
            entry
                .resolve(&Arguments::new(), &ProcessEnv)
                .map(|_| ())
                .map_err(|e| miette!("{}: {e}", entry.name()))
        });

        match outcome {
            Ok(()) => {
                if !args.json {
                    println!(
                        "{} {file}",
                        "ok".if_supports_color(Stream::Stdout, |t| t.green())
                    );
                }
                results.push(CheckResult {
                    file,
                    ok: true,
                    error: None,
                });
            }
            Err(report) => {
                if !args.json {
                    eprintln!("{report:?}");
                }
                results.push(CheckResult {
                    file,
                    ok: false,
                    error: Some(report.to_string()),
                });
            }
        }
    }

    if args.json {
        let json = serde_json::to_string_pretty(&results)
            .map_err(|e| miette!("JSON serialization failed: {e}"))?;
        println!("{json}");
    }

    if results.iter().all(|r| r.ok) {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
