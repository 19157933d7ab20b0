//! CLI command implementations.

mod check;
mod params;
mod resolve;

pub use check::{run_check, CheckArgs};
pub use params::{run_params, ParamsArgs};
pub use resolve::{run_resolve, ResolveArgs};

use std::path::Path;

use catparam::CatalogEntry;
use miette::{miette, Report};
use tracing::debug;

use crate::output::EntryDiagnostic;
use crate::source::{parse_entry, read_entry_file, SourceError};

/// Load an entry file, turning failures into reportable diagnostics.
///
/// JSON errors carry the file contents so miette can point at the offending
/// location.
pub(crate) fn load_entry(path: &Path, no_env: bool) -> Result<CatalogEntry, Report> {
    let content = read_entry_file(path).map_err(|e| miette!("{e}"))?;
    match parse_entry(&content) {
        Ok(entry) => {
            debug!(path = %path.display(), entry = entry.name(), "loaded entry");
            Ok(if no_env { entry.with_getenv(false) } else { entry })
        }
        Err(SourceError::Json(err)) => {
            Err(EntryDiagnostic::from_json_error(path, &content, &err).into())
        }
        Err(err) => Err(miette!("{}: {err}", path.display())),
    }
}
