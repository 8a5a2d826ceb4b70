use clap::{Args, ValueEnum};
use serde_json::{json, Value};
use std::io::Write;

use flowen_core::report::{to_delimited, to_document, Column, DocumentOptions, ReportTable};

use super::{load_filtered, skip_note, FilterArgs};

#[derive(Debug, Clone, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Document,
}

/// Arguments for exporting filtered records
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Export format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Columns to export, in order (comma-separated field names)
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "account_id,name,region,loan_type,risk_level,total_debt,dpd,payment_status"
    )]
    pub columns: Vec<String>,

    /// Display labels for the header row (comma-separated, one per column)
    #[arg(long, value_delimiter = ',')]
    pub headers: Option<Vec<String>>,

    /// Write to this file instead of stdout
    #[arg(long)]
    pub out: Option<String>,

    /// Document title (document format only)
    #[arg(long, default_value = "Flowen Debtor Report")]
    pub title: String,

    /// Data rows per document page (document format only)
    #[arg(long, default_value_t = 40)]
    pub rows_per_page: usize,
}

pub fn run_export(data: &str, args: ExportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (records, outcome) = load_filtered(data, &args.filter)?;

    let columns: Vec<Column> = args
        .columns
        .iter()
        .map(|c| c.parse())
        .collect::<Result<_, _>>()?;
    let headers = args.headers.unwrap_or_default();
    let table = ReportTable::from_records(&records, &columns, &headers)?;

    let bytes = match args.format {
        ExportFormat::Csv => to_delimited(&table)?,
        ExportFormat::Document => {
            let opts =
                DocumentOptions::new(args.title.as_str()).rows_per_page(args.rows_per_page);
            to_document(&table, &opts)?
        }
    };

    match args.out {
        Some(path) => {
            std::fs::write(&path, &bytes)?;
            let mut envelope = json!({
                "written": path,
                "rows": records.len(),
                "bytes": bytes.len(),
            });
            if let Some(note) = skip_note(&outcome) {
                envelope["note"] = Value::String(note);
            }
            Ok(envelope)
        }
        None => {
            // Stream the artifact itself; the envelope would corrupt it.
            std::io::stdout().write_all(&bytes)?;
            Ok(Value::Null)
        }
    }
}
