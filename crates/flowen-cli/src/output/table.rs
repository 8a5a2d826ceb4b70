use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{primary_array, render_scalar};

/// Render the envelope as a terminal table.
///
/// Envelopes with a row array (records, groups, cross-tab cells) become one
/// table with the object keys as headers; everything else falls back to a
/// two-column field/value grid. The skipped-row note, when present, prints
/// after the table rather than hiding inside it.
pub fn print_table(value: &Value) {
    if let Some(rows) = primary_array(value) {
        print_rows(rows);
    } else if let Some(Value::Object(summary)) = value.get("summary") {
        print_pairs(summary);
    } else if let Value::Object(map) = value {
        print_pairs(map);
    } else {
        println!("{}", render_scalar(value));
    }

    if let Some(Value::String(note)) = value.get("note") {
        println!("\nNote: {}", note);
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in rows {
        if let Value::Object(map) = row {
            builder.push_record(
                headers
                    .iter()
                    .map(|h| map.get(h).map(render_scalar).unwrap_or_default()),
            );
        }
    }
    println!("{}", Table::from(builder));
}

fn print_pairs(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if key == "note" {
            continue;
        }
        builder.push_record([key.as_str(), &render_scalar(val)]);
    }
    println!("{}", Table::from(builder));
}
