use clap::Args;
use serde_json::{json, Value};

use flowen_core::insights::summarize;

use super::{load_filtered, skip_note, FilterArgs};

/// Arguments for the portfolio summary
#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

pub fn run_summary(data: &str, args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (records, outcome) = load_filtered(data, &args.filter)?;
    let summary = summarize(&records);

    let mut envelope = json!({
        "summary": summary,
        "rows_loaded": outcome.records.len(),
        "rows_skipped": outcome.rejected.len(),
    });
    if let Some(note) = skip_note(&outcome) {
        envelope["note"] = Value::String(note);
    }
    Ok(envelope)
}
