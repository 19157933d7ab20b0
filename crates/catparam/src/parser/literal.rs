//! Structured literal parser using winnow.
//!
//! Parses the textual form of list and dict values, as written in catalog
//! sources or passed as overrides on the command line:
//! - Lists `[1, 2]` and tuples `(1, 2)` (tuples become lists)
//! - Dicts `{'a': 1, "b": [true]}`
//! - Single- or double-quoted strings with backslash escapes
//! - Integers and floats
//! - `True` / `False` / `None` and `true` / `false` / `null`
//!
//! Trailing commas and surrounding whitespace are accepted.

use std::collections::BTreeMap;
use std::num::ParseFloatError;

use super::error::LiteralError;
use crate::types::Value;
use winnow::ascii::{digit0, digit1};
use winnow::combinator::{alt, delimited, opt, separated, separated_pair, terminated};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

/// Deepest bracket nesting accepted in a literal.
const MAX_DEPTH: usize = 64;

/// Parse a complete structured literal.
pub fn parse_literal(input: &str) -> Result<Value, LiteralError> {
    if let Some(pos) = too_deep(input) {
        let (line, column) = calculate_position(input, &input[pos..]);
        return Err(LiteralError::Syntax {
            line,
            column,
            message: "nesting too deep".to_string(),
        });
    }

    let mut remaining = input;
    match value(&mut remaining) {
        Ok(v) => {
            if remaining.is_empty() {
                Ok(v)
            } else {
                let (line, column) = calculate_position(input, remaining);
                Err(LiteralError::Syntax {
                    line,
                    column,
                    message: format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                })
            }
        }
        Err(e) => {
            if input.trim().is_empty() {
                return Err(LiteralError::Empty);
            }
            let (line, column) = calculate_position(input, remaining);
            Err(LiteralError::Syntax {
                line,
                column,
                message: format!("parse error: {e}"),
            })
        }
    }
}

/// Byte offset of the first opener nested deeper than [`MAX_DEPTH`].
///
/// Quoted text is skipped with the same escape rules as [`string`].
fn too_deep(input: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote = None;
    let mut escaped = false;
    for (pos, c) in input.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '[' | '(' | '{' => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Some(pos);
                }
            }
            ']' | ')' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = consumed_str.rfind('\n');
    let column = match last_newline {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}

/// Parse any value, with surrounding whitespace.
fn value(input: &mut &str) -> ModalResult<Value> {
    delimited(ws, alt((dict, list, tuple, string, number, keyword)), ws).parse_next(input)
}

/// Parse a list: `[a, b, ...]`
fn list(input: &mut &str) -> ModalResult<Value> {
    delimited('[', items, ']').map(Value::List).parse_next(input)
}

/// Parse a tuple: `(a, b, ...)`, represented as a list.
fn tuple(input: &mut &str) -> ModalResult<Value> {
    delimited('(', items, ')').map(Value::List).parse_next(input)
}

/// Parse comma-separated values with an optional trailing comma.
fn items(input: &mut &str) -> ModalResult<Vec<Value>> {
    terminated(separated(0.., value, ','), (opt(','), ws)).parse_next(input)
}

/// Parse a dict: `{key: value, ...}`
fn dict(input: &mut &str) -> ModalResult<Value> {
    let entries: Vec<(String, Value)> = delimited(
        '{',
        terminated(separated(0.., entry, ','), (opt(','), ws)),
        '}',
    )
    .parse_next(input)?;
    Ok(Value::Dict(entries.into_iter().collect::<BTreeMap<_, _>>()))
}

/// Parse a dict entry. Non-string keys are keyed by their textual form.
fn entry(input: &mut &str) -> ModalResult<(String, Value)> {
    separated_pair(value, ':', value)
        .map(|(key, value)| {
            let key = match key {
                Value::Str(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .parse_next(input)
}

/// Parse a quoted string with backslash escapes.
fn string(input: &mut &str) -> ModalResult<Value> {
    let quote = one_of(['\'', '"']).parse_next(input)?;
    let mut out = String::new();
    loop {
        match any.parse_next(input)? {
            c if c == quote => return Ok(Value::Str(out)),
            '\\' => {
                let escaped = any.parse_next(input)?;
                out.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '0' => '\0',
                    other => other,
                });
            }
            other => out.push(other),
        }
    }
}

/// Parse an integer or float.
fn number(input: &mut &str) -> ModalResult<Value> {
    (
        opt(one_of(['+', '-'])),
        digit1,
        opt(('.', digit0)),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .try_map(number_value)
        .parse_next(input)
}

fn number_value(text: &str) -> Result<Value, ParseFloatError> {
    let is_float = text.contains(['.', 'e', 'E']);
    if !is_float {
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Value::Int(n));
        }
    }
    text.parse::<f64>().map(Value::Float)
}

/// Parse `True`/`False`/`None` and their lowercase JSON spellings.
fn keyword(input: &mut &str) -> ModalResult<Value> {
    alt((
        "True".value(Value::Bool(true)),
        "False".value(Value::Bool(false)),
        "None".value(Value::Null),
        "true".value(Value::Bool(true)),
        "false".value(Value::Bool(false)),
        "null".value(Value::Null),
    ))
    .parse_next(input)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}
