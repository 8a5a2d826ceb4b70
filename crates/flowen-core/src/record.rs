use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::{FlowenError, FlowenResult};

/// One debtor account. Loaded once, held immutably; every query produces a
/// derived view rather than mutating the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtorRecord {
    pub account_id: String,
    pub name: String,
    pub region: String,
    pub loan_type: String,
    pub risk_score: Score,
    pub ai_risk_score: Score,
    pub risk_level: RiskLevel,
    pub total_debt: Money,
    pub dpd: u32,
    pub age: u32,
    pub monthly_income: Money,
    pub contact_channel: String,
    pub response_behavior: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payment_days_ago: Option<u32>,
}

impl DebtorRecord {
    /// Age bucket, pure function of `age`.
    pub fn age_group(&self) -> AgeGroup {
        AgeGroup::from_age(self.age)
    }

    /// Payment status bucket, pure function of `dpd`.
    pub fn payment_status(&self) -> PaymentStatus {
        PaymentStatus::from_dpd(self.dpd)
    }

    /// Rule-based outreach strategy for this account's risk bucket.
    pub fn recommended_journey(&self) -> Journey {
        Journey::for_risk(self.risk_level)
    }

    /// Check the record against the schema's domain constraints. `dpd` and
    /// `age` are unsigned by construction; the remaining constraints are
    /// non-negative money amounts and the age ceiling.
    pub fn validate(&self) -> FlowenResult<()> {
        if self.account_id.trim().is_empty() {
            return Err(FlowenError::Validation {
                field: "account_id".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.total_debt < Decimal::ZERO {
            return Err(FlowenError::Validation {
                field: "total_debt".into(),
                reason: format!("must be non-negative, got {}", self.total_debt),
            });
        }
        if self.monthly_income < Decimal::ZERO {
            return Err(FlowenError::Validation {
                field: "monthly_income".into(),
                reason: format!("must be non-negative, got {}", self.monthly_income),
            });
        }
        if self.age > MAX_AGE {
            return Err(FlowenError::Validation {
                field: "age".into(),
                reason: format!("must be within [0, {}], got {}", MAX_AGE, self.age),
            });
        }
        Ok(())
    }
}
