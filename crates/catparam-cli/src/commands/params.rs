//! Implementation of the `catparam params` command.

use std::path::PathBuf;

use crate::output::table::format_parameters_table;

use super::load_entry;

/// Arguments for the params command.
#[derive(Debug, clap::Args)]
pub struct ParamsArgs {
    /// Entry file (.json)
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the params command.
pub fn run_params(args: ParamsArgs, no_env: bool) -> miette::Result<i32> {
    let entry = load_entry(&args.file, no_env)?;
    let description = entry.describe();

    if args.json {
        let json = serde_json::to_string_pretty(&description)
            .map_err(|e| miette::miette!("JSON serialization failed: {e}"))?;
        println!("{json}");
        return Ok(exitcode::OK);
    }

    match &description.description {
        Some(text) => println!("{} ({}): {text}", description.name, description.driver),
        None => println!("{} ({})", description.name, description.driver),
    }
    if description.parameters.is_empty() {
        println!("no user parameters");
    } else {
        println!("{}", format_parameters_table(&description.parameters));
    }

    Ok(exitcode::OK)
}
