//! The single logical (rows, columns, headers) representation both export
//! formats render from. Building it once is what keeps the delimited and
//! document outputs from drifting apart, column by column, the way the
//! per-screen formatting the source duplicated did.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

use crate::query::aggregate::{CrossTabCell, GroupStat};
use crate::record::DebtorRecord;
use crate::{FlowenError, FlowenResult};

/// Exportable columns: every stored field plus the derived buckets and the
/// journey recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    AccountId,
    Name,
    Region,
    LoanType,
    RiskScore,
    AiRiskScore,
    RiskLevel,
    TotalDebt,
    Dpd,
    Age,
    MonthlyIncome,
    ContactChannel,
    ResponseBehavior,
    LastPaymentDate,
    LastPaymentDaysAgo,
    AgeGroup,
    PaymentStatus,
    RecommendedJourney,
}

impl Column {
    fn cell(&self, record: &DebtorRecord) -> Cell {
        match self {
            Self::AccountId => Cell::Text(record.account_id.clone()),
            Self::Name => Cell::Text(record.name.clone()),
            Self::Region => Cell::Text(record.region.clone()),
            Self::LoanType => Cell::Text(record.loan_type.clone()),
            Self::RiskScore => Cell::Number(record.risk_score),
            Self::AiRiskScore => Cell::Number(record.ai_risk_score),
            Self::RiskLevel => Cell::Text(record.risk_level.to_string()),
            Self::TotalDebt => Cell::Number(record.total_debt),
            Self::Dpd => Cell::Int(record.dpd as u64),
            Self::Age => Cell::Int(record.age as u64),
            Self::MonthlyIncome => Cell::Number(record.monthly_income),
            Self::ContactChannel => Cell::Text(record.contact_channel.clone()),
            Self::ResponseBehavior => Cell::Text(record.response_behavior.clone()),
            Self::LastPaymentDate => match record.last_payment_date {
                Some(d) => Cell::Date(d),
                None => Cell::Empty,
            },
            Self::LastPaymentDaysAgo => match record.last_payment_days_ago {
                Some(d) => Cell::Int(d as u64),
                None => Cell::Empty,
            },
            Self::AgeGroup => Cell::Text(record.age_group().to_string()),
            Self::PaymentStatus => Cell::Text(record.payment_status().to_string()),
            Self::RecommendedJourney => Cell::Text(record.recommended_journey().to_string()),
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AccountId => "account_id",
            Self::Name => "name",
            Self::Region => "region",
            Self::LoanType => "loan_type",
            Self::RiskScore => "risk_score",
            Self::AiRiskScore => "ai_risk_score",
            Self::RiskLevel => "risk_level",
            Self::TotalDebt => "total_debt",
            Self::Dpd => "dpd",
            Self::Age => "age",
            Self::MonthlyIncome => "monthly_income",
            Self::ContactChannel => "contact_channel",
            Self::ResponseBehavior => "response_behavior",
            Self::LastPaymentDate => "last_payment_date",
            Self::LastPaymentDaysAgo => "last_payment_days_ago",
            Self::AgeGroup => "age_group",
            Self::PaymentStatus => "payment_status",
            Self::RecommendedJourney => "recommended_journey",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Column {
    type Err = FlowenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "account_id" => Ok(Self::AccountId),
            "name" => Ok(Self::Name),
            "region" => Ok(Self::Region),
            "loan_type" => Ok(Self::LoanType),
            "risk_score" => Ok(Self::RiskScore),
            "ai_risk_score" => Ok(Self::AiRiskScore),
            "risk_level" => Ok(Self::RiskLevel),
            "total_debt" => Ok(Self::TotalDebt),
            "dpd" => Ok(Self::Dpd),
            "age" => Ok(Self::Age),
            "monthly_income" => Ok(Self::MonthlyIncome),
            "contact_channel" => Ok(Self::ContactChannel),
            "response_behavior" => Ok(Self::ResponseBehavior),
            "last_payment_date" => Ok(Self::LastPaymentDate),
            "last_payment_days_ago" => Ok(Self::LastPaymentDaysAgo),
            "age_group" => Ok(Self::AgeGroup),
            "payment_status" => Ok(Self::PaymentStatus),
            "recommended_journey" => Ok(Self::RecommendedJourney),
            other => Err(FlowenError::InvalidField(other.to_string())),
        }
    }
}

/// A single typed cell. Numbers render at full precision; rounding for
/// display belongs to the caller, before the table is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Cell {
    Text(String),
    Number(Decimal),
    Int(u64),
    Date(NaiveDate),
    Empty,
}

impl Cell {
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(d) => d.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Empty => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    /// Materialize a record sequence into caller-ordered columns with
    /// caller-supplied display labels. Pass an empty `headers` slice to use
    /// the column field names as labels.
    ///
    /// A column that is empty in every row of a non-empty sequence names a
    /// field the dataset never supplied, which is a caller error. Zero rows
    /// build a valid header-only table.
    pub fn from_records(
        records: &[DebtorRecord],
        columns: &[Column],
        headers: &[String],
    ) -> FlowenResult<Self> {
        let headers = resolve_headers(columns, headers)?;
        let rows: Vec<Vec<Cell>> = records
            .iter()
            .map(|r| columns.iter().map(|c| c.cell(r)).collect())
            .collect();

        if !rows.is_empty() {
            for (i, column) in columns.iter().enumerate() {
                if rows.iter().all(|row| row[i] == Cell::Empty) {
                    return Err(FlowenError::MissingColumn(column.to_string()));
                }
            }
        }

        Ok(Self { headers, rows })
    }

    /// Materialize an aggregation result.
    pub fn from_groups(stats: &[GroupStat], key_header: &str, value_header: &str) -> Self {
        Self {
            headers: vec![key_header.to_string(), value_header.to_string()],
            rows: stats
                .iter()
                .map(|s| vec![Cell::Text(s.key.clone()), Cell::Number(s.value)])
                .collect(),
        }
    }

    /// Materialize a cross tabulation as a long-form three-column table.
    pub fn from_cross_tab(
        cells: &[CrossTabCell],
        header_a: &str,
        header_b: &str,
        count_header: &str,
    ) -> Self {
        Self {
            headers: vec![
                header_a.to_string(),
                header_b.to_string(),
                count_header.to_string(),
            ],
            rows: cells
                .iter()
                .map(|c| {
                    vec![
                        Cell::Text(c.key_a.clone()),
                        Cell::Text(c.key_b.clone()),
                        Cell::Int(c.count),
                    ]
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn resolve_headers(columns: &[Column], headers: &[String]) -> FlowenResult<Vec<String>> {
    if headers.is_empty() {
        return Ok(columns.iter().map(|c| c.to_string()).collect());
    }
    if headers.len() != columns.len() {
        return Err(FlowenError::InvalidField(format!(
            "expected {} header labels, got {}",
            columns.len(),
            headers.len()
        )));
    }
    Ok(headers.to_vec())
}
