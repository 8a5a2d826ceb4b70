use serde_json::Value;

use super::render_scalar;

/// Print just the headline number of the envelope.
///
/// Summary envelopes answer with the account total, listings with their
/// match count, exports with the written path; otherwise the first scalar
/// field wins.
pub fn print_minimal(value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", render_scalar(value));
        return;
    };

    if let Some(Value::Object(summary)) = map.get("summary") {
        if let Some(total) = summary.get("total_accounts") {
            println!("{}", render_scalar(total));
            return;
        }
    }

    for key in ["count", "written"] {
        if let Some(val) = map.get(key) {
            if !val.is_null() {
                println!("{}", render_scalar(val));
                return;
            }
        }
    }

    if let Some(groups) = map.get("groups").and_then(Value::as_array) {
        for group in groups {
            let key = group.get("key").map(render_scalar).unwrap_or_default();
            let val = group.get("value").map(render_scalar).unwrap_or_default();
            println!("{}: {}", key, val);
        }
        return;
    }

    if let Some((key, val)) = map.iter().find(|(_, v)| !v.is_object() && !v.is_array()) {
        println!("{}: {}", key, render_scalar(val));
        return;
    }

    println!("{}", render_scalar(value));
}
