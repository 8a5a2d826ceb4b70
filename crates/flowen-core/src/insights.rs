//! Portfolio-level KPI rollup: the headline numbers a dashboard host shows
//! above the charts.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

use crate::query::aggregate::{share, GroupStat};
use crate::record::DebtorRecord;
use crate::types::{Money, RiskLevel, Score};

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub total_accounts: usize,
    pub total_outstanding: Money,
    /// None for an empty portfolio; never a fabricated zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_risk_score: Option<Score>,
    /// Percentage of accounts in the High risk bucket, 0–100 scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_risk_share: Option<Decimal>,
    pub unique_regions: usize,
    /// Payment-status mix in first-seen order.
    pub status_counts: Vec<GroupStat>,
}

/// Compute the portfolio rollup. Pure function of the record slice; an empty
/// slice yields an explicit empty state rather than zero-filled averages.
pub fn summarize(records: &[DebtorRecord]) -> PortfolioSummary {
    let total_accounts = records.len();
    let total_outstanding: Money = records.iter().map(|r| r.total_debt).sum();

    let mean_risk_score = if records.is_empty() {
        None
    } else {
        let sum: Decimal = records.iter().map(|r| r.risk_score).sum();
        Some(sum / Decimal::from(total_accounts as u64))
    };

    let high = records
        .iter()
        .filter(|r| r.risk_level == RiskLevel::High)
        .count();
    let high_risk_share = share(Decimal::from(high as u64), Decimal::from(total_accounts as u64));

    let unique_regions = records
        .iter()
        .map(|r| r.region.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut status_order: Vec<String> = Vec::new();
    let mut status_counts: Vec<GroupStat> = Vec::new();
    for record in records {
        let key = record.payment_status().to_string();
        match status_order.iter().position(|k| k == &key) {
            Some(i) => status_counts[i].value += Decimal::ONE,
            None => {
                status_order.push(key.clone());
                status_counts.push(GroupStat {
                    key,
                    value: Decimal::ONE,
                });
            }
        }
    }

    PortfolioSummary {
        total_accounts,
        total_outstanding,
        mean_risk_score,
        high_risk_share,
        unique_regions,
        status_counts,
    }
}
