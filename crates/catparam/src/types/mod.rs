mod param_type;
mod value;

pub use param_type::ParamType;
pub use value::Value;
