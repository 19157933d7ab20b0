//! Public AST types for argument templates.
//!
//! These types are public to enable external tooling (linters, listing tools).

/// A parsed argument string containing segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// True if the template contains no tokens at all.
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Names of the parameters referenced by `{{name}}` tokens, in order of
    /// first appearance.
    pub fn parameter_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Parameter { name, .. } = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// A segment within a template.
///
/// Token segments keep their `raw` source text so that a token which cannot
/// be substituted is reproduced exactly as written.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text (no substitution).
    Literal(String),
    /// A parameter reference: `{{name}}`
    Parameter { name: String, raw: String },
    /// An environment reference: `{{env(VAR)}}`
    Env { var: String, raw: String },
}

/// Classification of a complete string against the token grammars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognized {
    /// The string is not exactly one token.
    Literal,
    /// The whole string is `{{name}}`.
    Parameter(String),
    /// The whole string is `{{env(VAR)}}`.
    TemplatedEnv(String),
    /// The whole string is the bare form `env(VAR)`.
    BareEnv(String),
}
