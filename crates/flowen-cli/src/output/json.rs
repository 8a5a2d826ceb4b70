use serde_json::Value;

/// Pretty-print the full envelope as JSON, the default output mode.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => eprintln!("Failed to render JSON output: {}", e),
    }
}
