use serde_json::Value;
use std::io;

use super::{primary_array, render_scalar};

/// Write the envelope as CSV to stdout: the primary row array when there is
/// one, otherwise a field,value listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(rows) = primary_array(value) {
        write_rows(&mut wtr, rows);
    } else if let Value::Object(map) = value {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &render_scalar(val)]);
        }
    } else {
        let _ = wtr.write_record([&render_scalar(value)]);
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = wtr.write_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(render_scalar).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}
