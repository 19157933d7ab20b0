//! Environment variable lookup.
//!
//! Resolution never touches the process environment directly; it reads
//! through an [`Environment`] so callers can inject a controlled snapshot.
//! Lookups happen at call time and are never cached.

use std::collections::BTreeMap;
use std::env;

/// Read-only access to environment variables by exact name.
pub trait Environment {
    /// Current value of `name`, or `None` if it is unset.
    fn var(&self, name: &str) -> Option<String>;
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// The real process environment.
///
/// Values that are not valid unicode are converted lossily.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }
}

/// An in-memory environment snapshot.
///
/// # Example
///
/// ```
/// use catparam::{Environment, MapEnv};
///
/// let mut env = MapEnv::new().with("HOME", "/home/me");
/// assert_eq!(env.var("HOME").as_deref(), Some("/home/me"));
///
/// env.remove("HOME");
/// assert_eq!(env.var("HOME"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return this environment with `name` set to `value`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set `name` to `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Unset `name`.
    pub fn remove(&mut self, name: &str) {
        self.vars.remove(name);
    }
}

impl Environment for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
