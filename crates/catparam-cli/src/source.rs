//! Entry files: a single catalog entry declared as JSON.
//!
//! ```json
//! {
//!   "name": "trips",
//!   "driver": "csv",
//!   "args": {"urlpath": "{{root}}/trips.csv"},
//!   "parameters": [{"name": "root", "type": "str", "default": "env(DATA_ROOT)"}]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::io;
use std::path::{Path, PathBuf};

use catparam::{CatalogEntry, DeclarationError, ParamType, UserParameter, Value};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Errors from reading or interpreting an entry file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid entry JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Declaration(#[from] DeclarationError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntryFile {
    name: String,
    #[serde(default)]
    description: Option<String>,
    driver: String,
    #[serde(default)]
    args: BTreeMap<String, JsonValue>,
    #[serde(default)]
    parameters: Vec<ParameterFile>,
    #[serde(default = "getenv_default")]
    getenv: bool,
    #[serde(default)]
    metadata: BTreeMap<String, JsonValue>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParameterFile {
    name: String,
    #[serde(default, rename = "type")]
    param_type: Option<String>,
    #[serde(default)]
    default: Option<JsonValue>,
    #[serde(default)]
    allowed: Option<Vec<JsonValue>>,
    #[serde(default)]
    description: Option<String>,
}

fn getenv_default() -> bool {
    true
}

fn to_values(map: BTreeMap<String, JsonValue>) -> BTreeMap<String, Value> {
    map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
}

impl ParameterFile {
    fn into_parameter(self) -> Result<UserParameter, DeclarationError> {
        let param_type = self
            .param_type
            .as_deref()
            .map(str::parse::<ParamType>)
            .transpose()?;
        UserParameter::builder(self.name)
            .maybe_param_type(param_type)
            .maybe_default(self.default.map(Value::from))
            .maybe_allowed(
                self.allowed
                    .map(|values| values.into_iter().map(Value::from).collect()),
            )
            .maybe_description(self.description)
            .build()
    }
}

/// Read an entry file's contents.
pub fn read_entry_file(path: &Path) -> Result<String, SourceError> {
    read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Build a catalog entry from entry-file JSON.
pub fn parse_entry(content: &str) -> Result<CatalogEntry, SourceError> {
    let file: EntryFile = serde_json::from_str(content)?;
    let parameters = file
        .parameters
        .into_iter()
        .map(ParameterFile::into_parameter)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CatalogEntry::builder(file.name)
        .driver(file.driver)
        .maybe_description(file.description)
        .args(to_values(file.args))
        .parameters(parameters)
        .getenv(file.getenv)
        .metadata(to_values(file.metadata))
        .build()?)
}
