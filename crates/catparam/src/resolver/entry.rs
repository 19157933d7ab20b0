//! Catalog entries and the per-call resolution pipeline.

use std::collections::BTreeMap;

use bon::bon;
use serde::Serialize;
use tracing::debug;

use crate::parser::ast::Template;
use crate::parser::parse_template;
use crate::resolver::expand::{ExpandContext, expand_template};
use crate::resolver::{
    Arguments, DeclarationError, Driver, Environment, InvokeError, ParameterDescription,
    UserParameter, ValidationError, ValueOrigin,
};
use crate::types::Value;

/// A declared argument: its raw value and, for strings containing tokens,
/// the parsed template.
#[derive(Debug, Clone, PartialEq)]
struct Argument {
    raw: Value,
    template: Option<Template>,
}

impl Argument {
    fn new(raw: Value) -> Self {
        let template = raw
            .as_str()
            .map(parse_template)
            .filter(|template| !template.is_literal());
        Self { raw, template }
    }

    fn expand(&self, ctx: &ExpandContext<'_>) -> Value {
        match &self.template {
            Some(template) => Value::Str(expand_template(template, ctx)),
            None => self.raw.clone(),
        }
    }
}

/// A named, parameterized description of how to instantiate a data source.
///
/// Entries are immutable. Every call to [`CatalogEntry::resolve`] or
/// [`CatalogEntry::invoke`] is an independent resolution that reads the
/// environment afresh.
///
/// # Example
///
/// ```
/// use catparam::{CatalogEntry, MapEnv, UserParameter, Value, kwargs};
///
/// let entry = CatalogEntry::builder("trips")
///     .driver("csv")
///     .args(kwargs! { "urlpath" => "s3://bucket/{{year}}/trips.csv" })
///     .parameters(vec![UserParameter::builder("year").default(2020).build().unwrap()])
///     .build()
///     .unwrap();
///
/// let env = MapEnv::new();
/// let call = entry.resolve(&kwargs! {}, &env).unwrap();
/// assert_eq!(call.arguments["urlpath"], Value::from("s3://bucket/2020/trips.csv"));
///
/// let call = entry.resolve(&kwargs! { "year" => "2021" }, &env).unwrap();
/// assert_eq!(call.arguments["urlpath"], Value::from("s3://bucket/2021/trips.csv"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    name: String,
    description: Option<String>,
    driver: String,
    args: BTreeMap<String, Argument>,
    parameters: Vec<UserParameter>,
    getenv: bool,
    metadata: BTreeMap<String, Value>,
}

#[bon]
impl CatalogEntry {
    /// Declare an entry.
    ///
    /// String arguments are parsed for template tokens once, here.
    /// Environment lookups are enabled unless `getenv(false)` is given.
    #[builder]
    pub fn new(
        #[builder(start_fn, into)] name: String,
        #[builder(into)] driver: String,
        #[builder(into)] description: Option<String>,
        #[builder(default)] args: BTreeMap<String, Value>,
        #[builder(default)] parameters: Vec<UserParameter>,
        #[builder(default = true)] getenv: bool,
        #[builder(default)] metadata: BTreeMap<String, Value>,
    ) -> Result<Self, DeclarationError> {
        for (i, parameter) in parameters.iter().enumerate() {
            if parameters[..i]
                .iter()
                .any(|earlier| earlier.name() == parameter.name())
            {
                return Err(DeclarationError::DuplicateParameter {
                    name: parameter.name().to_string(),
                });
            }
        }

        Ok(Self {
            name,
            description,
            driver,
            args: args
                .into_iter()
                .map(|(name, raw)| (name, Argument::new(raw)))
                .collect(),
            parameters,
            getenv,
            metadata,
        })
    }
}

impl CatalogEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn driver(&self) -> &str {
        &self.driver
    }

    pub fn getenv(&self) -> bool {
        self.getenv
    }

    pub fn parameters(&self) -> &[UserParameter] {
        &self.parameters
    }

    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    /// Look up a declared parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&UserParameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    /// Raw declared arguments, in name order.
    pub fn args(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.args.iter().map(|(name, arg)| (name.as_str(), &arg.raw))
    }

    /// A copy of this entry with environment lookups switched on or off.
    pub fn with_getenv(&self, getenv: bool) -> Self {
        Self {
            getenv,
            ..self.clone()
        }
    }

    /// Resolve the final keyword arguments for one call.
    ///
    /// In order:
    /// 1. Every declared parameter resolves to its override or its default.
    /// 2. String arguments are template-expanded with those values. Overrides
    ///    naming no parameter also fill `{{name}}` tokens, beneath the
    ///    parameter values.
    /// 3. An override naming an argument takes its place, and is expanded
    ///    the same way.
    /// 4. Arguments named like a parameter are validated against it.
    /// 5. Overrides naming neither a parameter nor an argument are passed
    ///    through unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`]; no partial result is produced.
    pub fn resolve(
        &self,
        overrides: &Arguments,
        env: &dyn Environment,
    ) -> Result<ResolvedCall, ValidationError> {
        let mut parameters = BTreeMap::new();
        for parameter in &self.parameters {
            let value = parameter.resolve(overrides.get(parameter.name()), env, self.getenv)?;
            parameters.insert(parameter.name().to_string(), value);
        }

        let mut context: BTreeMap<String, Value> = overrides
            .iter()
            .filter(|(name, _)| self.parameter(name).is_none())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        context.extend(parameters.iter().map(|(k, v)| (k.clone(), v.clone())));

        let ctx = ExpandContext::new(&context, env, self.getenv);
        let mut arguments = Arguments::new();
        for (name, arg) in &self.args {
            let (value, origin) = match overrides.get(name) {
                Some(value) => (
                    Argument::new(value.clone()).expand(&ctx),
                    ValueOrigin::Override,
                ),
                None => (arg.expand(&ctx), ValueOrigin::Argument),
            };
            let value = match self.parameter(name) {
                Some(parameter) => parameter.validate(&value, origin)?,
                None => value,
            };
            arguments.insert(name.clone(), value);
        }

        for (name, value) in overrides {
            if self.parameter(name).is_none() && !self.args.contains_key(name) {
                debug!(entry = %self.name, keyword = %name, "forwarding undeclared override");
                arguments.insert(name.clone(), value.clone());
            }
        }

        debug!(
            entry = %self.name,
            parameters = parameters.len(),
            arguments = arguments.len(),
            "resolved call"
        );
        Ok(ResolvedCall {
            parameters,
            arguments,
        })
    }

    /// Resolve a call and hand the arguments to `driver`.
    ///
    /// The driver is not called if resolution fails.
    pub fn invoke<D: Driver>(
        &self,
        driver: &D,
        overrides: &Arguments,
        env: &dyn Environment,
    ) -> Result<D::Output, InvokeError<D::Error>> {
        let call = self.resolve(overrides, env)?;
        driver
            .instantiate(&self.driver, call.arguments)
            .map_err(|source| InvokeError::Driver {
                driver: self.driver.clone(),
                source,
            })
    }

    /// A serializable summary of this entry.
    pub fn describe(&self) -> EntryDescription {
        EntryDescription {
            name: self.name.clone(),
            description: self.description.clone(),
            driver: self.driver.clone(),
            getenv: self.getenv,
            parameters: self.parameters.iter().map(UserParameter::describe).collect(),
            arguments: self.args.keys().cloned().collect(),
            metadata: self.metadata.clone(),
        }
    }
}

/// The outcome of resolving one call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCall {
    /// Resolved value of every declared parameter.
    pub parameters: BTreeMap<String, Value>,
    /// Final keyword arguments for the driver.
    pub arguments: Arguments,
}

/// Summary of an entry, for listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryDescription {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub driver: String,
    pub getenv: bool,
    pub parameters: Vec<ParameterDescription>,
    pub arguments: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}
