pub mod coerce;
pub mod parser;
pub mod resolver;
pub mod types;

pub use coerce::{CoerceError, CoerceReason, coerce};
pub use resolver::{
    Arguments, CatalogEntry, DeclarationError, DefaultValue, Driver, EntryDescription,
    Environment, InvokeError, MapEnv, ParameterDescription, ProcessEnv, ResolvedCall,
    UserParameter, ValidationError, ValueOrigin, compute_suggestions, expand,
};
pub use types::{ParamType, Value};

/// Creates a `BTreeMap<String, Value>` from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, booleans or strings directly. Use it for an entry's
/// arguments and for call overrides.
///
/// # Example
///
/// ```
/// use catparam::{kwargs, Value};
///
/// let k = kwargs! { "count" => 3, "name" => "Alice" };
/// assert_eq!(k.len(), 2);
/// assert_eq!(k["count"].as_int(), Some(3));
/// assert_eq!(k["name"].as_str(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! kwargs {
    {} => {
        ::std::collections::BTreeMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::BTreeMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
