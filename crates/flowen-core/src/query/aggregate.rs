//! Grouped summary statistics over a record sequence.
//!
//! Groups appear in first-seen input order and only observed groups are
//! emitted: a zero-count group, or a mean over no values, is absent from the
//! result rather than surfacing as zero or null.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::record::DebtorRecord;
use crate::{FlowenError, FlowenResult};

/// Categorical fields a result set can be grouped by. Includes the derived
/// buckets, which are as groupable as any stored column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupField {
    Region,
    LoanType,
    RiskLevel,
    ContactChannel,
    ResponseBehavior,
    AgeGroup,
    PaymentStatus,
}

impl GroupField {
    pub fn key_of(&self, record: &DebtorRecord) -> String {
        match self {
            Self::Region => record.region.clone(),
            Self::LoanType => record.loan_type.clone(),
            Self::RiskLevel => record.risk_level.to_string(),
            Self::ContactChannel => record.contact_channel.clone(),
            Self::ResponseBehavior => record.response_behavior.clone(),
            Self::AgeGroup => record.age_group().to_string(),
            Self::PaymentStatus => record.payment_status().to_string(),
        }
    }
}

impl std::fmt::Display for GroupField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Region => "region",
            Self::LoanType => "loan_type",
            Self::RiskLevel => "risk_level",
            Self::ContactChannel => "contact_channel",
            Self::ResponseBehavior => "response_behavior",
            Self::AgeGroup => "age_group",
            Self::PaymentStatus => "payment_status",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for GroupField {
    type Err = FlowenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "region" => Ok(Self::Region),
            "loan_type" => Ok(Self::LoanType),
            "risk_level" => Ok(Self::RiskLevel),
            "contact_channel" => Ok(Self::ContactChannel),
            "response_behavior" => Ok(Self::ResponseBehavior),
            "age_group" => Ok(Self::AgeGroup),
            "payment_status" => Ok(Self::PaymentStatus),
            other => Err(FlowenError::InvalidField(other.to_string())),
        }
    }
}

/// Numeric fields a metric can reduce over. `LastPaymentDaysAgo` is the one
/// optional-valued field in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    RiskScore,
    AiRiskScore,
    TotalDebt,
    Dpd,
    Age,
    MonthlyIncome,
    LastPaymentDaysAgo,
}

impl MetricField {
    pub fn value_of(&self, record: &DebtorRecord) -> Option<Decimal> {
        match self {
            Self::RiskScore => Some(record.risk_score),
            Self::AiRiskScore => Some(record.ai_risk_score),
            Self::TotalDebt => Some(record.total_debt),
            Self::Dpd => Some(Decimal::from(record.dpd)),
            Self::Age => Some(Decimal::from(record.age)),
            Self::MonthlyIncome => Some(record.monthly_income),
            Self::LastPaymentDaysAgo => record.last_payment_days_ago.map(Decimal::from),
        }
    }
}

impl std::fmt::Display for MetricField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::RiskScore => "risk_score",
            Self::AiRiskScore => "ai_risk_score",
            Self::TotalDebt => "total_debt",
            Self::Dpd => "dpd",
            Self::Age => "age",
            Self::MonthlyIncome => "monthly_income",
            Self::LastPaymentDaysAgo => "last_payment_days_ago",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for MetricField {
    type Err = FlowenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "risk_score" => Ok(Self::RiskScore),
            "ai_risk_score" => Ok(Self::AiRiskScore),
            "total_debt" => Ok(Self::TotalDebt),
            "dpd" => Ok(Self::Dpd),
            "age" => Ok(Self::Age),
            "monthly_income" => Ok(Self::MonthlyIncome),
            "last_payment_days_ago" => Ok(Self::LastPaymentDaysAgo),
            other => Err(FlowenError::InvalidField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Count,
    Mean,
    Sum,
}

impl FromStr for MetricKind {
    type Err = FlowenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "count" => Ok(Self::Count),
            "mean" => Ok(Self::Mean),
            "sum" => Ok(Self::Sum),
            other => Err(FlowenError::InvalidField(format!(
                "metric kind '{}' (expected count/mean/sum)",
                other
            ))),
        }
    }
}

/// One group in an aggregation result, full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStat {
    pub key: String,
    pub value: Decimal,
}

/// One cell of a two-key cross tabulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossTabCell {
    pub key_a: String,
    pub key_b: String,
    pub count: u64,
}

/// Group `records` by `group` and reduce `metric` with `kind`.
///
/// Count ignores the metric values. For mean and sum, records where the
/// metric is missing contribute nothing; a metric missing from *every*
/// record of a non-empty input is a caller error. An empty input yields an
/// empty result.
pub fn aggregate(
    records: &[DebtorRecord],
    group: GroupField,
    metric: MetricField,
    kind: MetricKind,
) -> FlowenResult<Vec<GroupStat>> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<Decimal>> = HashMap::new();
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut any_value = false;

    for record in records {
        let key = group.key_of(record);
        if !counts.contains_key(&key) {
            order.push(key.clone());
        }
        *counts.entry(key.clone()).or_insert(0) += 1;
        if let Some(v) = metric.value_of(record) {
            any_value = true;
            buckets.entry(key).or_default().push(v);
        }
    }

    if kind != MetricKind::Count && !records.is_empty() && !any_value {
        return Err(FlowenError::InvalidField(format!(
            "metric '{}' has no value in any input record",
            metric
        )));
    }

    let mut result = Vec::with_capacity(order.len());
    for key in order {
        let value = match kind {
            MetricKind::Count => Decimal::from(counts[&key]),
            MetricKind::Sum => match buckets.get(&key) {
                Some(values) => values.iter().copied().sum(),
                None => continue, // no observed values in this group
            },
            MetricKind::Mean => match buckets.get(&key) {
                Some(values) if !values.is_empty() => {
                    let sum: Decimal = values.iter().copied().sum();
                    sum / Decimal::from(values.len() as u64)
                }
                _ => continue, // a mean over nothing is undefined, not zero
            },
        };
        result.push(GroupStat { key, value });
    }
    Ok(result)
}

/// Two-key cross tabulation: group by `group_a`, then by `group_b` within
/// each partition. Cell order follows first-seen order of both keys.
pub fn cross_tab(
    records: &[DebtorRecord],
    group_a: GroupField,
    group_b: GroupField,
) -> Vec<CrossTabCell> {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut counts: HashMap<(String, String), u64> = HashMap::new();

    for record in records {
        let pair = (group_a.key_of(record), group_b.key_of(record));
        if !counts.contains_key(&pair) {
            order.push(pair.clone());
        }
        *counts.entry(pair).or_insert(0) += 1;
    }

    // Re-order so all cells of the first-seen key_a come before the next.
    let mut a_order: Vec<String> = Vec::new();
    for (a, _) in &order {
        if !a_order.contains(a) {
            a_order.push(a.clone());
        }
    }
    let mut cells = Vec::with_capacity(order.len());
    for a in &a_order {
        for (key_a, key_b) in &order {
            if key_a == a {
                cells.push(CrossTabCell {
                    key_a: key_a.clone(),
                    key_b: key_b.clone(),
                    count: counts[&(key_a.clone(), key_b.clone())],
                });
            }
        }
    }
    cells
}

/// Top `n` records by `metric`, descending. The sort is stable, so ties keep
/// their original relative order; records missing the metric sort last.
pub fn top_n(
    records: &[DebtorRecord],
    n: usize,
    metric: MetricField,
) -> FlowenResult<Vec<DebtorRecord>> {
    if !records.is_empty() && records.iter().all(|r| metric.value_of(r).is_none()) {
        return Err(FlowenError::InvalidField(format!(
            "metric '{}' has no value in any input record",
            metric
        )));
    }
    let mut ranked: Vec<&DebtorRecord> = records.iter().collect();
    ranked.sort_by(|a, b| {
        let va = metric.value_of(a);
        let vb = metric.value_of(b);
        match (va, vb) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
    Ok(ranked.into_iter().take(n).cloned().collect())
}

/// Percentage of `part` in `whole`: `100 * part / whole`, full precision.
/// None when the whole is zero — the caller decides how to present an empty
/// base, the engine never divides by it.
pub fn share(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        None
    } else {
        Some(Decimal::ONE_HUNDRED * part / whole)
    }
}
