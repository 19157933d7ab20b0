//! Table formatting utilities for CLI output.

use std::collections::BTreeMap;

use catparam::{ParameterDescription, Value};
use comfy_table::{presets, ContentArrangement, Table};

/// Format final keyword arguments (or parameter values) as an ASCII table.
pub fn format_values_table(values: &BTreeMap<String, Value>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Value", "Kind"]);

    for (name, value) in values {
        table.add_row(vec![name.clone(), value.repr(), value.kind().to_string()]);
    }

    table
}

/// Format parameter declarations as an ASCII table.
pub fn format_parameters_table(parameters: &[ParameterDescription]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Type", "Default", "Allowed", "Description"]);

    for parameter in parameters {
        let allowed = parameter
            .allowed
            .as_ref()
            .map(|values| {
                values
                    .iter()
                    .map(Value::repr)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        table.add_row(vec![
            parameter.name.clone(),
            parameter.param_type.to_string(),
            parameter.default.clone(),
            allowed,
            parameter.description.clone().unwrap_or_default(),
        ]);
    }

    table
}
