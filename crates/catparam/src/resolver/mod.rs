//! Parameter resolution for catalog entries.
//!
//! This module turns an entry's declarations plus a caller's overrides into
//! the final keyword arguments for a driver: it resolves parameter values,
//! expands argument templates, applies overrides and validates the result.

mod driver;
mod entry;
mod env;
mod error;
mod expand;
mod parameter;

pub use driver::{Arguments, Driver};
pub use entry::{CatalogEntry, EntryDescription, ResolvedCall};
pub use env::{Environment, MapEnv, ProcessEnv};
pub use error::{DeclarationError, InvokeError, ValidationError, ValueOrigin, compute_suggestions};
pub use expand::{ExpandContext, expand, expand_template};
pub use parameter::{DefaultValue, ParameterDescription, UserParameter};
