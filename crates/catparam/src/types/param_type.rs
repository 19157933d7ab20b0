use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use crate::resolver::{DeclarationError, compute_suggestions};
use crate::types::Value;

/// The declared type of a [`UserParameter`](crate::UserParameter).
///
/// `unicode` is accepted when parsing a type name and is folded into
/// [`ParamType::Str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamType {
    Bool,
    Datetime,
    Dict,
    Float,
    Int,
    List,
    Str,
}

impl ParamType {
    /// Every supported type, in canonical name order.
    pub const ALL: [ParamType; 7] = [
        ParamType::Bool,
        ParamType::Datetime,
        ParamType::Dict,
        ParamType::Float,
        ParamType::Int,
        ParamType::List,
        ParamType::Str,
    ];

    /// Canonical lowercase name of the type.
    pub fn name(self) -> &'static str {
        match self {
            ParamType::Bool => "bool",
            ParamType::Datetime => "datetime",
            ParamType::Dict => "dict",
            ParamType::Float => "float",
            ParamType::Int => "int",
            ParamType::List => "list",
            ParamType::Str => "str",
        }
    }

    /// The value a parameter of this type takes when it declares no default.
    pub fn zero_value(self) -> Value {
        match self {
            ParamType::Bool => Value::Bool(false),
            ParamType::Datetime => Value::Datetime(NaiveDateTime::default()),
            ParamType::Dict => Value::Dict(BTreeMap::new()),
            ParamType::Float => Value::Float(0.0),
            ParamType::Int => Value::Int(0),
            ParamType::List => Value::List(Vec::new()),
            ParamType::Str => Value::Str(String::new()),
        }
    }

    /// Infer a type from the runtime kind of a default value.
    ///
    /// `Null` carries no type information and infers `str`.
    pub fn infer(value: &Value) -> ParamType {
        match value {
            Value::Null | Value::Str(_) => ParamType::Str,
            Value::Bool(_) => ParamType::Bool,
            Value::Int(_) => ParamType::Int,
            Value::Float(_) => ParamType::Float,
            Value::List(_) => ParamType::List,
            Value::Dict(_) => ParamType::Dict,
            Value::Datetime(_) => ParamType::Datetime,
        }
    }
}

impl FromStr for ParamType {
    type Err = DeclarationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bool" => Ok(ParamType::Bool),
            "datetime" => Ok(ParamType::Datetime),
            "dict" => Ok(ParamType::Dict),
            "float" => Ok(ParamType::Float),
            "int" => Ok(ParamType::Int),
            "list" => Ok(ParamType::List),
            "str" | "unicode" => Ok(ParamType::Str),
            other => {
                let known: Vec<String> = ParamType::ALL
                    .iter()
                    .map(|t| t.name().to_string())
                    .chain(["unicode".to_string()])
                    .collect();
                Err(DeclarationError::UnknownType {
                    name: other.to_string(),
                    suggestions: compute_suggestions(other, &known),
                })
            }
        }
    }
}

impl Display for ParamType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl Serialize for ParamType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
