use napi::Result as NapiResult;
use napi_derive::napi;

use flowen_core::query::{GroupField, MetricField, MetricKind};
use flowen_core::report::{Column, DocumentOptions, ReportTable};
use flowen_core::DebtorRecord;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_records(records_json: &str) -> NapiResult<Vec<DebtorRecord>> {
    serde_json::from_str(records_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

/// Parse CSV text into `{ records, rejected }`. Fail-soft: invalid rows land
/// in `rejected` with the field and reason, valid rows load regardless.
#[napi]
pub fn load_dataset(csv_text: String) -> NapiResult<String> {
    let outcome = flowen_core::loader::load(csv_text.as_bytes()).map_err(to_napi_error)?;
    serde_json::to_string(&outcome).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[napi]
pub fn filter_records(records_json: String, spec_json: String) -> NapiResult<String> {
    let records = parse_records(&records_json)?;
    let spec: flowen_core::query::FilterSpec =
        serde_json::from_str(&spec_json).map_err(to_napi_error)?;
    let filtered = flowen_core::query::filter(&records, &spec);
    serde_json::to_string(&filtered).map_err(to_napi_error)
}

#[napi]
pub fn aggregate_records(
    records_json: String,
    group_by: String,
    metric: String,
    kind: String,
) -> NapiResult<String> {
    let records = parse_records(&records_json)?;
    let group: GroupField = group_by.parse().map_err(to_napi_error)?;
    let metric: MetricField = metric.parse().map_err(to_napi_error)?;
    let kind: MetricKind = kind.parse().map_err(to_napi_error)?;
    let groups =
        flowen_core::query::aggregate(&records, group, metric, kind).map_err(to_napi_error)?;
    serde_json::to_string(&groups).map_err(to_napi_error)
}

#[napi]
pub fn cross_tab_records(
    records_json: String,
    group_a: String,
    group_b: String,
) -> NapiResult<String> {
    let records = parse_records(&records_json)?;
    let a: GroupField = group_a.parse().map_err(to_napi_error)?;
    let b: GroupField = group_b.parse().map_err(to_napi_error)?;
    let cells = flowen_core::query::cross_tab(&records, a, b);
    serde_json::to_string(&cells).map_err(to_napi_error)
}

#[napi]
pub fn top_accounts(records_json: String, n: u32, metric: String) -> NapiResult<String> {
    let records = parse_records(&records_json)?;
    let metric: MetricField = metric.parse().map_err(to_napi_error)?;
    let top = flowen_core::query::top_n(&records, n as usize, metric).map_err(to_napi_error)?;
    serde_json::to_string(&top).map_err(to_napi_error)
}

#[napi]
pub fn portfolio_summary(records_json: String) -> NapiResult<String> {
    let records = parse_records(&records_json)?;
    let summary = flowen_core::insights::summarize(&records);
    serde_json::to_string(&summary).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

fn build_table(
    records_json: &str,
    columns_json: &str,
    headers_json: Option<&str>,
) -> NapiResult<ReportTable> {
    let records = parse_records(records_json)?;
    let names: Vec<String> = serde_json::from_str(columns_json).map_err(to_napi_error)?;
    let columns: Vec<Column> = names
        .iter()
        .map(|c| c.parse())
        .collect::<Result<_, _>>()
        .map_err(to_napi_error)?;
    // Omitted headers fall back to the column names.
    let headers: Vec<String> = match headers_json {
        Some(json) => serde_json::from_str(json).map_err(to_napi_error)?,
        None => Vec::new(),
    };
    ReportTable::from_records(&records, &columns, &headers).map_err(to_napi_error)
}

#[napi]
pub fn export_delimited(
    records_json: String,
    columns_json: String,
    headers_json: Option<String>,
) -> NapiResult<String> {
    let table = build_table(&records_json, &columns_json, headers_json.as_deref())?;
    let bytes = flowen_core::report::to_delimited(&table).map_err(to_napi_error)?;
    String::from_utf8(bytes).map_err(to_napi_error)
}

#[napi]
pub fn export_document(
    records_json: String,
    columns_json: String,
    title: String,
    headers_json: Option<String>,
) -> NapiResult<String> {
    let table = build_table(&records_json, &columns_json, headers_json.as_deref())?;
    let opts = DocumentOptions::new(title);
    let bytes = flowen_core::report::to_document(&table, &opts).map_err(to_napi_error)?;
    String::from_utf8(bytes).map_err(to_napi_error)
}
