use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::FlowenError;

/// All monetary values (Thai baht in the reference dataset). Wraps Decimal
/// to prevent accidental f64 usage.
pub type Money = Decimal;

/// Model scores. The source data mixes 0–1 and 0–100 scales, so scores are
/// carried as supplied and never rescaled.
pub type Score = Decimal;

/// Oldest age the schema accepts.
pub const MAX_AGE: u32 = 130;

/// Closed categorical risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RiskLevel {
    type Err = FlowenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(FlowenError::Validation {
                field: "risk_level".into(),
                reason: format!("'{}' is not one of Low/Medium/High", other),
            }),
        }
    }
}

/// Payment status derived from days past due. The three arms partition the
/// non-negative integers: 0, 1..=29, 30..
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    InProgress,
    Stuck,
}

impl PaymentStatus {
    pub fn from_dpd(dpd: u32) -> Self {
        match dpd {
            0 => Self::Paid,
            1..=29 => Self::InProgress,
            _ => Self::Stuck,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Paid => "Paid",
            Self::InProgress => "In Progress",
            Self::Stuck => "Stuck",
        };
        write!(f, "{}", s)
    }
}

/// Age bucket with half-open (lo, hi] edges; a boundary age belongs to the
/// lower bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    UpTo25,
    From26To35,
    From36To45,
    Over45,
}

impl AgeGroup {
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=25 => Self::UpTo25,
            26..=35 => Self::From26To35,
            36..=45 => Self::From36To45,
            _ => Self::Over45,
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::UpTo25 => "<=25",
            Self::From26To35 => "26-35",
            Self::From36To45 => "36-45",
            Self::Over45 => "46+",
        };
        write!(f, "{}", s)
    }
}

/// Named outreach strategy. Rule-derived from the risk bucket; a real
/// scoring model would supply this as an input instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Journey {
    CallLineWait,
    SmsLineCall,
    LineEmailEscalate,
}

impl Journey {
    pub fn for_risk(level: RiskLevel) -> Self {
        match level {
            RiskLevel::High => Self::CallLineWait,
            RiskLevel::Medium => Self::SmsLineCall,
            RiskLevel::Low => Self::LineEmailEscalate,
        }
    }
}

impl std::fmt::Display for Journey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CallLineWait => "Call → LINE → Wait 3 Days",
            Self::SmsLineCall => "SMS → LINE + Call",
            Self::LineEmailEscalate => "LINE → Email → Escalate",
        };
        write!(f, "{}", s)
    }
}
