//! Fail-soft CSV ingestion.
//!
//! A malformed row never aborts the load: it is collected into
//! [`LoadOutcome::rejected`] with the offending field and reason, and the
//! loader proceeds with the valid subset. Only I/O and reader-level CSV
//! failures are hard errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::record::DebtorRecord;
use crate::types::RiskLevel;
use crate::{FlowenError, FlowenResult};

/// Result of one ingestion pass. Built completely before being handed to the
/// caller, so a host can reload with copy-then-swap semantics.
#[derive(Debug, Clone, Serialize)]
pub struct LoadOutcome {
    pub records: Vec<DebtorRecord>,
    pub rejected: Vec<RejectedRow>,
}

impl LoadOutcome {
    /// Total rows seen in the source, valid or not.
    pub fn rows_seen(&self) -> usize {
        self.records.len() + self.rejected.len()
    }
}

/// One skipped source row with the constraint it violated.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRow {
    /// 1-based line number in the source file (header is line 1).
    pub line: usize,
    pub field: String,
    pub reason: String,
}

/// Raw row as it appears in the file. Everything is optional text so that a
/// missing or malformed field can be reported per row instead of failing the
/// whole read.
#[derive(Debug, Deserialize)]
struct RawRow {
    account_id: Option<String>,
    name: Option<String>,
    region: Option<String>,
    loan_type: Option<String>,
    risk_score: Option<String>,
    ai_risk_score: Option<String>,
    risk_level: Option<String>,
    total_debt: Option<String>,
    dpd: Option<String>,
    age: Option<String>,
    monthly_income: Option<String>,
    contact_channel: Option<String>,
    response_behavior: Option<String>,
    last_payment_date: Option<String>,
    last_payment_days_ago: Option<String>,
}

/// Load a debtor dataset from any reader.
pub fn load<R: Read>(reader: R) -> FlowenResult<LoadOutcome> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records: Vec<DebtorRecord> = Vec::new();
    let mut rejected: Vec<RejectedRow> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (idx, row) in rdr.deserialize::<RawRow>().enumerate() {
        let line = idx + 2; // header occupies line 1
        let raw = match row {
            Ok(raw) => raw,
            Err(e) => {
                rejected.push(RejectedRow {
                    line,
                    field: "row".into(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match parse_row(&raw) {
            Ok(record) => {
                if !seen_ids.insert(record.account_id.clone()) {
                    rejected.push(RejectedRow {
                        line,
                        field: "account_id".into(),
                        reason: format!("duplicate account_id '{}'", record.account_id),
                    });
                } else {
                    records.push(record);
                }
            }
            Err(FlowenError::Validation { field, reason }) => {
                rejected.push(RejectedRow { line, field, reason });
            }
            Err(other) => return Err(other),
        }
    }

    Ok(LoadOutcome { records, rejected })
}

/// Load a debtor dataset from a file path.
pub fn load_path<P: AsRef<Path>>(path: P) -> FlowenResult<LoadOutcome> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        FlowenError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to open '{}': {}", path.display(), e),
        ))
    })?;
    load(file)
}

fn parse_row(raw: &RawRow) -> FlowenResult<DebtorRecord> {
    let record = DebtorRecord {
        account_id: required(&raw.account_id, "account_id")?.to_string(),
        name: required(&raw.name, "name")?.to_string(),
        region: required(&raw.region, "region")?.to_string(),
        loan_type: required(&raw.loan_type, "loan_type")?.to_string(),
        risk_score: parse_decimal(&raw.risk_score, "risk_score")?,
        ai_risk_score: parse_decimal(&raw.ai_risk_score, "ai_risk_score")?,
        risk_level: RiskLevel::from_str(required(&raw.risk_level, "risk_level")?)?,
        total_debt: parse_decimal(&raw.total_debt, "total_debt")?,
        dpd: parse_u32(&raw.dpd, "dpd")?,
        age: parse_u32(&raw.age, "age")?,
        monthly_income: parse_decimal(&raw.monthly_income, "monthly_income")?,
        contact_channel: required(&raw.contact_channel, "contact_channel")?.to_string(),
        response_behavior: required(&raw.response_behavior, "response_behavior")?.to_string(),
        last_payment_date: parse_date_opt(&raw.last_payment_date)?,
        last_payment_days_ago: parse_u32_opt(&raw.last_payment_days_ago, "last_payment_days_ago")?,
    };
    record.validate()?;
    Ok(record)
}

fn required<'a>(value: &'a Option<String>, field: &str) -> FlowenResult<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(FlowenError::Validation {
            field: field.into(),
            reason: "required field is missing".into(),
        }),
    }
}

fn parse_decimal(value: &Option<String>, field: &str) -> FlowenResult<Decimal> {
    let s = required(value, field)?;
    Decimal::from_str(s).map_err(|_| FlowenError::Validation {
        field: field.into(),
        reason: format!("'{}' is not a valid number", s),
    })
}

fn parse_u32(value: &Option<String>, field: &str) -> FlowenResult<u32> {
    let s = required(value, field)?;
    s.parse::<u32>().map_err(|_| FlowenError::Validation {
        field: field.into(),
        reason: format!("'{}' is not a non-negative integer", s),
    })
}

fn parse_u32_opt(value: &Option<String>, field: &str) -> FlowenResult<Option<u32>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<u32>().map(Some).map_err(|_| FlowenError::Validation {
            field: field.into(),
            reason: format!("'{}' is not a non-negative integer", s),
        }),
    }
}

fn parse_date_opt(value: &Option<String>) -> FlowenResult<Option<NaiveDate>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| FlowenError::Validation {
                field: "last_payment_date".into(),
                reason: format!("'{}' is not a YYYY-MM-DD date", s),
            }),
    }
}
