//! Typed parameter declarations.

use bon::bon;
use serde::Serialize;

use crate::coerce::coerce;
use crate::parser::{Recognized, recognize};
use crate::resolver::{
    DeclarationError, Environment, ValidationError, ValueOrigin, compute_suggestions,
};
use crate::types::{ParamType, Value};

/// A parameter default, evaluated only when the default is actually used.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// A literal value, used as written.
    Literal(Value),
    /// A bare `env(VAR)` reference. `raw` is the text as declared.
    Env { var: String, raw: String },
}

impl DefaultValue {
    /// Classify a raw declared default.
    ///
    /// Only a string whose entire text is `env(VAR)` becomes [`DefaultValue::Env`].
    pub fn from_raw(raw: Value) -> Self {
        if let Value::Str(text) = &raw {
            if let Recognized::BareEnv(var) = recognize(text) {
                return DefaultValue::Env {
                    var,
                    raw: text.clone(),
                };
            }
        }
        DefaultValue::Literal(raw)
    }

    /// Produce the uncoerced default for one invocation.
    ///
    /// An environment reference reads the variable (empty if unset) when
    /// `getenv` is true, and yields its declared text unchanged otherwise.
    pub fn evaluate(&self, env: &dyn Environment, getenv: bool) -> Value {
        match self {
            DefaultValue::Literal(value) => value.clone(),
            DefaultValue::Env { var, .. } if getenv => Value::Str(env.var(var).unwrap_or_default()),
            DefaultValue::Env { raw, .. } => Value::Str(raw.clone()),
        }
    }

    /// The default as declared, for display.
    pub fn declared_text(&self) -> String {
        match self {
            DefaultValue::Literal(value) => value.repr(),
            DefaultValue::Env { raw, .. } => raw.clone(),
        }
    }
}

/// A named, typed parameter that callers may override.
///
/// # Example
///
/// ```
/// use catparam::{MapEnv, ParamType, UserParameter, Value};
///
/// let threads = UserParameter::builder("threads")
///     .param_type(ParamType::Int)
///     .default("4")
///     .build()
///     .unwrap();
///
/// let env = MapEnv::new();
/// assert_eq!(threads.resolve(None, &env, true).unwrap(), Value::Int(4));
/// assert_eq!(threads.resolve(Some(&"8".into()), &env, true).unwrap(), Value::Int(8));
/// assert!(threads.resolve(Some(&"many".into()), &env, true).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UserParameter {
    name: String,
    param_type: ParamType,
    default: DefaultValue,
    allowed: Option<Vec<Value>>,
    description: Option<String>,
}

#[bon]
impl UserParameter {
    /// Declare a parameter.
    ///
    /// The type is taken from `param_type` if given, otherwise inferred from
    /// `default`, otherwise `str`. Without a default, the type's zero value is
    /// used; a `null` default counts as no default. Allowed values are
    /// coerced to the type here; the default is not checked until it is used.
    #[builder]
    pub fn new(
        #[builder(start_fn, into)] name: String,
        param_type: Option<ParamType>,
        #[builder(into)] default: Option<Value>,
        allowed: Option<Vec<Value>>,
        #[builder(into)] description: Option<String>,
    ) -> Result<Self, DeclarationError> {
        if name.is_empty() {
            return Err(DeclarationError::EmptyName);
        }

        let default = default.filter(|value| !value.is_null());
        let param_type = param_type
            .or_else(|| default.as_ref().map(ParamType::infer))
            .unwrap_or(ParamType::Str);
        let default = DefaultValue::from_raw(default.unwrap_or_else(|| param_type.zero_value()));

        let allowed = allowed
            .map(|values| {
                values
                    .iter()
                    .map(|value| coerce(param_type, value))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()
            .map_err(|source| DeclarationError::InvalidAllowed {
                parameter: name.clone(),
                source,
            })?;

        Ok(Self {
            name,
            param_type,
            default,
            allowed,
            description,
        })
    }
}

impl UserParameter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_type(&self) -> ParamType {
        self.param_type
    }

    pub fn default(&self) -> &DefaultValue {
        &self.default
    }

    pub fn allowed(&self) -> Option<&[Value]> {
        self.allowed.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Resolve this parameter for one invocation.
    ///
    /// Uses `override_value` if given, otherwise the evaluated default, and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the chosen value cannot be coerced to
    /// the declared type or is not in the allowed set. The error's origin
    /// records whether the default or the override was rejected.
    pub fn resolve(
        &self,
        override_value: Option<&Value>,
        env: &dyn Environment,
        getenv: bool,
    ) -> Result<Value, ValidationError> {
        match override_value {
            Some(value) => self.validate(value, ValueOrigin::Override),
            None => self.validate(&self.default.evaluate(env, getenv), ValueOrigin::Default),
        }
    }

    /// Coerce `value` to this parameter's type and check the allowed set.
    pub fn validate(&self, value: &Value, origin: ValueOrigin) -> Result<Value, ValidationError> {
        let coerced =
            coerce(self.param_type, value).map_err(|source| ValidationError::Coercion {
                parameter: self.name.clone(),
                origin,
                source,
            })?;

        if let Some(allowed) = &self.allowed {
            if !allowed.contains(&coerced) {
                let candidates: Vec<String> = allowed.iter().map(ToString::to_string).collect();
                return Err(ValidationError::NotAllowed {
                    parameter: self.name.clone(),
                    origin,
                    suggestions: compute_suggestions(&coerced.to_string(), &candidates),
                    value: coerced,
                    allowed: allowed.clone(),
                });
            }
        }

        Ok(coerced)
    }

    /// A serializable summary of this declaration.
    pub fn describe(&self) -> ParameterDescription {
        ParameterDescription {
            name: self.name.clone(),
            param_type: self.param_type,
            default: self.default.declared_text(),
            allowed: self.allowed.clone(),
            description: self.description.clone(),
        }
    }
}

/// Summary of a parameter declaration, for listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub default: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
