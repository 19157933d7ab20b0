//! Implementation of the `catparam resolve` command.

use std::path::PathBuf;

use catparam::{Arguments, ProcessEnv, Value};
use owo_colors::{OwoColorize, Stream};

use crate::output::table::format_values_table;

use super::load_entry;

/// Arguments for the resolve command.
#[derive(Debug, clap::Args)]
pub struct ResolveArgs {
    /// Entry file (.json)
    pub file: PathBuf,

    /// Override in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Also print the resolved parameter values
    #[arg(long)]
    pub show_params: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse a key=value pair.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=value: no '=' found in '{s}'"))?;
    let key = &s[..pos];
    if key.is_empty() {
        return Err(format!("invalid KEY=value: empty key in '{s}'"));
    }
    Ok((key.to_string(), s[pos + 1..].to_string()))
}

/// Run the resolve command.
///
/// Override values are passed as text and coerced like any other override.
pub fn run_resolve(args: ResolveArgs, no_env: bool) -> miette::Result<i32> {
    let entry = load_entry(&args.file, no_env)?;
    let overrides: Arguments = args
        .params
        .into_iter()
        .map(|(key, value)| (key, Value::Str(value)))
        .collect();

    let call = match entry.resolve(&overrides, &ProcessEnv) {
        Ok(call) => call,
        Err(e) => {
            eprintln!(
                "{}: {e}",
                "error".if_supports_color(Stream::Stderr, |t| t.red())
            );
            return Ok(exitcode::DATAERR);
        }
    };

    if args.json {
        let json = serde_json::to_string_pretty(&call)
            .map_err(|e| miette::miette!("JSON serialization failed: {e}"))?;
        println!("{json}");
        return Ok(exitcode::OK);
    }

    if args.show_params {
        println!("Parameters:");
        println!("{}", format_values_table(&call.parameters));
        println!("Arguments for {}:", entry.driver());
    }
    println!("{}", format_values_table(&call.arguments));

    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_equals() {
        assert_eq!(
            parse_key_val("query=a=b").unwrap(),
            ("query".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_key_val("year=").unwrap(),
            ("year".to_string(), String::new())
        );
    }

    #[test]
    fn rejects_missing_equals_and_empty_key() {
        assert!(parse_key_val("year").is_err());
        assert!(parse_key_val("=2020").is_err());
    }
}
