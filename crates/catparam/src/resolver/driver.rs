//! The driver seam: whatever turns resolved arguments into a data source.

use std::collections::BTreeMap;
use std::error::Error as StdError;

use crate::types::Value;

/// Final keyword arguments handed to a driver.
pub type Arguments = BTreeMap<String, Value>;

/// Instantiates a data source from a driver identifier and resolved arguments.
///
/// Implemented for any `Fn(&str, Arguments) -> Result<O, E>`.
pub trait Driver {
    type Output;
    type Error: StdError + 'static;

    fn instantiate(&self, driver: &str, kwargs: Arguments) -> Result<Self::Output, Self::Error>;
}

impl<F, O, E> Driver for F
where
    F: Fn(&str, Arguments) -> Result<O, E>,
    E: StdError + 'static,
{
    type Output = O;
    type Error = E;

    fn instantiate(&self, driver: &str, kwargs: Arguments) -> Result<O, E> {
        self(driver, kwargs)
    }
}
