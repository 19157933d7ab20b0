//! Conversion of raw values into declared parameter types.
//!
//! The same rules apply no matter where a value came from (a declared
//! default, a caller override, or the result of template expansion), so a
//! given input is accepted or rejected identically in every position.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::parser::{LiteralError, parse_literal};
use crate::types::{ParamType, Value};

/// A value that cannot be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot interpret {} as {expected}: {reason}", value.repr())]
pub struct CoerceError {
    pub expected: ParamType,
    pub value: Value,
    pub reason: CoerceReason,
}

/// Why a coercion was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceReason {
    #[error("null is not a value of any parameter type")]
    Null,

    #[error("a {found} value cannot be converted")]
    Incompatible { found: &'static str },

    #[error("not a valid number")]
    NotNumeric,

    #[error("{0} is not a whole number")]
    Fractional(f64),

    #[error("not a recognized boolean")]
    NotBoolean,

    #[error("expected a {expected} literal, found a {found}")]
    WrongShape {
        expected: ParamType,
        found: &'static str,
    },

    #[error(transparent)]
    Literal(#[from] LiteralError),

    #[error("not a recognized date/time format")]
    NotDatetime,

    #[error("timestamp out of range")]
    OutOfRange,
}

/// Text formats accepted for datetime values, tried in order after RFC 3339.
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y%m%dT%H%M%S",
];

/// Coerce `value` into `ty`.
///
/// # Errors
///
/// Returns [`CoerceError`] when the value has no valid interpretation as the
/// requested type: non-numeric text for `int`/`float`, unrecognized text for
/// `bool`, malformed or wrongly-shaped literals for `list`/`dict`,
/// unparsable timestamps for `datetime`, and `null` for every type.
///
/// # Example
///
/// ```
/// use catparam::{ParamType, Value, coerce};
///
/// assert_eq!(coerce(ParamType::Int, &Value::from("1")).unwrap(), Value::Int(1));
/// assert!(coerce(ParamType::Int, &Value::from("oi")).is_err());
/// ```
pub fn coerce(ty: ParamType, value: &Value) -> Result<Value, CoerceError> {
    let fail = |reason| CoerceError {
        expected: ty,
        value: value.clone(),
        reason,
    };

    if value.is_null() {
        return Err(fail(CoerceReason::Null));
    }

    match ty {
        ParamType::Str => Ok(Value::Str(value.to_string())),
        ParamType::Int => to_int(value).map(Value::Int).map_err(fail),
        ParamType::Float => to_float(value).map(Value::Float).map_err(fail),
        ParamType::Bool => to_bool(value).map(Value::Bool).map_err(fail),
        ParamType::List => to_container(ParamType::List, value).map_err(fail),
        ParamType::Dict => to_container(ParamType::Dict, value).map_err(fail),
        ParamType::Datetime => to_datetime(value).map(Value::Datetime).map_err(fail),
    }
}

fn to_int(value: &Value) -> Result<i64, CoerceReason> {
    match value {
        Value::Int(n) => Ok(*n),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Float(x) => {
            if x.is_finite() && x.fract() == 0.0 && x.abs() < 9.0e18 {
                Ok(*x as i64)
            } else {
                Err(CoerceReason::Fractional(*x))
            }
        }
        Value::Str(s) => s.trim().parse().map_err(|_| CoerceReason::NotNumeric),
        other => Err(CoerceReason::Incompatible {
            found: other.kind(),
        }),
    }
}

fn to_float(value: &Value) -> Result<f64, CoerceReason> {
    match value {
        Value::Float(x) => Ok(*x),
        Value::Int(n) => Ok(*n as f64),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Str(s) => s.trim().parse().map_err(|_| CoerceReason::NotNumeric),
        other => Err(CoerceReason::Incompatible {
            found: other.kind(),
        }),
    }
}

fn to_bool(value: &Value) -> Result<bool, CoerceReason> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Int(0) => Ok(false),
        Value::Int(1) => Ok(true),
        Value::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(CoerceReason::NotBoolean),
        },
        Value::Int(_) => Err(CoerceReason::NotBoolean),
        other => Err(CoerceReason::Incompatible {
            found: other.kind(),
        }),
    }
}

fn to_container(ty: ParamType, value: &Value) -> Result<Value, CoerceReason> {
    let parsed = match value {
        Value::Str(s) => parse_literal(s)?,
        other => other.clone(),
    };
    match (ty, parsed) {
        (ParamType::List, list @ Value::List(_)) | (ParamType::Dict, list @ Value::Dict(_)) => {
            Ok(list)
        }
        (_, other) if value.as_str().is_some() => Err(CoerceReason::WrongShape {
            expected: ty,
            found: other.kind(),
        }),
        (_, other) => Err(CoerceReason::Incompatible {
            found: other.kind(),
        }),
    }
}

fn to_datetime(value: &Value) -> Result<NaiveDateTime, CoerceReason> {
    match value {
        Value::Datetime(dt) => Ok(*dt),
        Value::Int(secs) => DateTime::from_timestamp(*secs, 0)
            .map(|dt| dt.naive_utc())
            .ok_or(CoerceReason::OutOfRange),
        Value::Float(secs) => {
            let millis = (secs * 1000.0).round();
            if !millis.is_finite() || millis.abs() > 9.0e18 {
                return Err(CoerceReason::OutOfRange);
            }
            DateTime::from_timestamp_millis(millis as i64)
                .map(|dt| dt.naive_utc())
                .ok_or(CoerceReason::OutOfRange)
        }
        Value::Str(s) => parse_datetime(s.trim()).ok_or(CoerceReason::NotDatetime),
        other => Err(CoerceReason::Incompatible {
            found: other.kind(),
        }),
    }
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
