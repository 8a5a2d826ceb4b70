use serde_json::Value;
use std::io::{self, Read};

/// Read a JSON filter spec from stdin when one is being piped in.
/// Returns None if stdin is a TTY (interactive) or empty.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut piped = String::new();
    io::stdin().read_to_string(&mut piped)?;

    let piped = piped.trim();
    if piped.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(piped)
        .map_err(|e| format!("Invalid JSON on stdin: {}", e))?;
    Ok(Some(value))
}
