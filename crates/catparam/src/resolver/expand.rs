//! Template expansion.
//!
//! Substitutes parameter values and environment variables into parsed
//! argument templates. Expansion is a single pass over the segments: the
//! substituted text is never scanned again for further tokens.

use std::collections::BTreeMap;

use tracing::trace;

use crate::parser::ast::{Segment, Template};
use crate::parser::parse_template;
use crate::resolver::Environment;
use crate::types::Value;

/// Inputs available while expanding templates for one invocation.
pub struct ExpandContext<'a> {
    /// Values available to `{{name}}` tokens.
    params: &'a BTreeMap<String, Value>,
    /// Environment to read `{{env(VAR)}}` tokens from.
    env: &'a dyn Environment,
    /// Whether environment tokens may be expanded at all.
    getenv: bool,
}

impl<'a> ExpandContext<'a> {
    /// Create a context over named values.
    pub fn new(params: &'a BTreeMap<String, Value>, env: &'a dyn Environment, getenv: bool) -> Self {
        Self {
            params,
            env,
            getenv,
        }
    }

    /// Get the value substituted for `{{name}}`.
    pub fn get_param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Value to substitute for an environment token.
    ///
    /// `None` when environment lookups are disabled; otherwise the variable's
    /// value, or an empty string if it is unset.
    pub fn env_value(&self, var: &str) -> Option<String> {
        self.getenv
            .then(|| self.env.var(var).unwrap_or_default())
    }
}

/// Expand a parsed template.
///
/// - `{{name}}` becomes the textual form of the named value; tokens naming
///   nothing in the context are kept verbatim.
/// - `{{env(VAR)}}` becomes the variable's value (empty if unset) when
///   environment lookups are enabled, and is kept verbatim otherwise.
pub fn expand_template(template: &Template, ctx: &ExpandContext<'_>) -> String {
    let mut output = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(s) => output.push_str(s),
            Segment::Parameter { name, raw } => match ctx.get_param(name) {
                Some(value) => {
                    trace!(parameter = %name, value = %value, "substituted parameter");
                    output.push_str(&value.to_string());
                }
                None => {
                    trace!(parameter = %name, "unknown name left unexpanded");
                    output.push_str(raw);
                }
            },
            Segment::Env { var, raw } => match ctx.env_value(var) {
                Some(value) => {
                    trace!(var = %var, "substituted environment variable");
                    output.push_str(&value);
                }
                None => output.push_str(raw),
            },
        }
    }
    output
}

/// Parse and expand a string in one step.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use catparam::{MapEnv, Value, expand};
///
/// let params = BTreeMap::from([("name".to_string(), Value::from("oi"))]);
/// let env = MapEnv::new().with("HOST", "db");
///
/// assert_eq!(expand("{{name}}@{{env(HOST)}}", &params, &env, true), "oi@db");
/// assert_eq!(expand("{{name}}@{{env(HOST)}}", &params, &env, false), "oi@{{env(HOST)}}");
/// ```
pub fn expand(
    text: &str,
    params: &BTreeMap<String, Value>,
    env: &dyn Environment,
    getenv: bool,
) -> String {
    let template = parse_template(text);
    expand_template(&template, &ExpandContext::new(params, env, getenv))
}
