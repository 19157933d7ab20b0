//! Error types for parameter declaration and call-time resolution.

use std::error::Error as StdError;
use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::coerce::CoerceError;
use crate::types::Value;

/// Where a value being validated came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueOrigin {
    /// The parameter's declared default.
    Default,
    /// A keyword supplied by the caller.
    Override,
    /// An argument value produced by template expansion.
    Argument,
}

impl Display for ValueOrigin {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            ValueOrigin::Default => "default",
            ValueOrigin::Override => "override",
            ValueOrigin::Argument => "argument value",
        })
    }
}

/// Errors in an entry or parameter declaration, reported at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeclarationError {
    /// Type name is not one of the supported parameter types.
    #[error("unknown parameter type '{name}'{}", did_you_mean(suggestions))]
    UnknownType {
        name: String,
        suggestions: Vec<String>,
    },

    /// Two parameters in one entry share a name.
    #[error("parameter '{name}' is declared more than once")]
    DuplicateParameter { name: String },

    /// Parameter name is empty.
    #[error("parameter name must not be empty")]
    EmptyName,

    /// An allowed value cannot be coerced to the parameter's type.
    #[error("allowed value for parameter '{parameter}' is invalid: {source}")]
    InvalidAllowed {
        parameter: String,
        #[source]
        source: CoerceError,
    },
}

/// A value that failed validation against a declared parameter.
///
/// This is the only error kind produced while resolving a call. The
/// `origin` distinguishes a bad default baked into the declaration from a
/// bad value supplied or produced at call time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The value cannot be converted to the parameter's type.
    #[error("invalid {origin} for parameter '{parameter}': {source}")]
    Coercion {
        parameter: String,
        origin: ValueOrigin,
        #[source]
        source: CoerceError,
    },

    /// The coerced value is not a member of the allowed set.
    #[error(
        "invalid {origin} for parameter '{parameter}': {} is not one of [{}]{}",
        value.repr(),
        allowed.iter().map(Value::repr).collect::<Vec<_>>().join(", "),
        did_you_mean(suggestions)
    )]
    NotAllowed {
        parameter: String,
        origin: ValueOrigin,
        value: Value,
        allowed: Vec<Value>,
        suggestions: Vec<String>,
    },
}

impl ValidationError {
    /// Name of the parameter that rejected the value.
    pub fn parameter(&self) -> &str {
        match self {
            ValidationError::Coercion { parameter, .. }
            | ValidationError::NotAllowed { parameter, .. } => parameter,
        }
    }

    /// Where the rejected value came from.
    pub fn origin(&self) -> ValueOrigin {
        match self {
            ValidationError::Coercion { origin, .. } | ValidationError::NotAllowed { origin, .. } => {
                *origin
            }
        }
    }
}

/// Failure of a full invocation: resolution or the driver itself.
#[derive(Debug, Error)]
pub enum InvokeError<E>
where
    E: StdError + 'static,
{
    /// Arguments did not validate; the driver was not called.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The driver rejected the resolved arguments.
    #[error("driver '{driver}' failed: {source}")]
    Driver {
        driver: String,
        #[source]
        source: E,
    },
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        let quoted = suggestions
            .iter()
            .map(|s| format!("'{s}'"))
            .collect::<Vec<_>>();
        format!(", did you mean {}?", quoted.join(" or "))
    }
}

/// Compute close matches for `key` among `available`, closest first.
///
/// Keys of three characters or fewer allow an edit distance of 1, longer
/// keys allow 2. At most three suggestions are returned.
pub fn compute_suggestions(key: &str, available: &[String]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|candidate| (strsim::levenshtein(key, candidate), candidate))
        .filter(|(distance, candidate)| *distance <= max_distance && candidate.as_str() != key)
        .collect();
    scored.sort();
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
