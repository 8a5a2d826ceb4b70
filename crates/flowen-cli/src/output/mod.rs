pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Keys under which the command envelopes carry their primary row arrays.
pub const ARRAY_KEYS: [&str; 3] = ["records", "groups", "cells"];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The primary array payload of an envelope, if it has one.
pub fn primary_array(value: &Value) -> Option<&Vec<Value>> {
    let map = value.as_object()?;
    ARRAY_KEYS
        .iter()
        .find_map(|k| map.get(*k).and_then(Value::as_array))
}

/// Render a scalar JSON value for table/CSV cells.
pub fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
