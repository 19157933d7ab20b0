//! Argument template parser using winnow.
//!
//! Splits a string argument into literal text and substitution tokens:
//! - `{{name}}` parameter references
//! - `{{env(VAR)}}` environment references
//!
//! Anything that does not form a complete token is literal text, so parsing
//! never fails.

use super::ast::{Recognized, Segment, Template};
use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::token::{one_of, take_till, take_while};

/// Parse an argument string into a template.
pub fn parse_template(input: &str) -> Template {
    let mut remaining = input;
    let segments: Vec<Segment> = match repeat(0.., segment).parse_next(&mut remaining) {
        Ok(segments) => segments,
        Err(_) => {
            remaining = "";
            vec![Segment::Literal(input.to_string())]
        }
    };

    let mut merged = merge_literals(segments);
    if !remaining.is_empty() {
        merged.push(Segment::Literal(remaining.to_string()));
    }
    Template { segments: merged }
}

/// Classify a complete string against the token grammars.
///
/// Only an exact match counts: `"{{a}} b"` is [`Recognized::Literal`].
pub fn recognize(text: &str) -> Recognized {
    let mut input = text;
    if let Ok((segment, _)) = token.parse_next(&mut input) {
        if input.is_empty() {
            return match segment {
                Segment::Parameter { name, .. } => Recognized::Parameter(name),
                Segment::Env { var, .. } => Recognized::TemplatedEnv(var),
                Segment::Literal(_) => Recognized::Literal,
            };
        }
    }

    let mut input = text;
    if let Ok(var) = env_call.parse_next(&mut input) {
        if input.is_empty() {
            return Recognized::BareEnv(var.to_string());
        }
    }

    Recognized::Literal
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Parse a single segment (token, literal run, or a stray brace).
fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((
        token.map(|(segment, _)| segment),
        literal_run,
        one_of('{').map(|c: char| Segment::Literal(c.to_string())),
    ))
    .parse_next(input)
}

/// Parse a run of text up to the next `{`.
fn literal_run(input: &mut &str) -> ModalResult<Segment> {
    take_till(1.., '{')
        .map(|s: &str| Segment::Literal(s.to_string()))
        .parse_next(input)
}

/// Parse a token: `{{ body }}`. Returns the segment and the raw token text.
fn token<'i>(input: &mut &'i str) -> ModalResult<(Segment, &'i str)> {
    delimited(("{{", ws), token_body, (ws, "}}"))
        .with_taken()
        .map(|(body, raw)| {
            let segment = match body {
                TokenBody::Env(var) => Segment::Env {
                    var: var.to_string(),
                    raw: raw.to_string(),
                },
                TokenBody::Parameter(name) => Segment::Parameter {
                    name: name.to_string(),
                    raw: raw.to_string(),
                },
            };
            (segment, raw)
        })
        .parse_next(input)
}

enum TokenBody<'i> {
    Env(&'i str),
    Parameter(&'i str),
}

/// Parse the content inside a token. `env(...)` wins over a parameter named `env`.
fn token_body<'i>(input: &mut &'i str) -> ModalResult<TokenBody<'i>> {
    alt((
        env_call.map(TokenBody::Env),
        identifier.map(TokenBody::Parameter),
    ))
    .parse_next(input)
}

/// Parse an environment call: `env(VAR)`.
fn env_call<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited(("env", ws, '(', ws), env_name, (ws, ')')).parse_next(input)
}

/// Parse an environment variable name.
fn env_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && !matches!(c, '(' | ')' | '{' | '}')
    })
    .parse_next(input)
}

/// Parse a parameter identifier.
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}
