//! Predicate filter over a loaded dataset.
//!
//! Each constraint is independent; present constraints combine with logical
//! AND. An absent constraint passes everything. An explicitly empty inclusion
//! set matches nothing — a deliberate, documented convention, since the UI
//! this replaced conflated "nothing selected" with "everything selected".

use serde::{Deserialize, Serialize};

use crate::record::DebtorRecord;
use crate::{FlowenError, FlowenResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSpec {
    /// Keep rows whose region is a member. `None` = unconstrained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
    /// Keep rows whose loan type is a member. `None` = unconstrained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_types: Option<Vec<String>>,
    /// Keep rows with at least this many days past due.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_dpd: Option<u32>,
}

impl FilterSpec {
    pub fn is_unconstrained(&self) -> bool {
        self.regions.is_none() && self.loan_types.is_none() && self.min_dpd.is_none()
    }

    pub fn matches(&self, record: &DebtorRecord) -> bool {
        if let Some(regions) = &self.regions {
            if !regions.iter().any(|r| r == &record.region) {
                return false;
            }
        }
        if let Some(loan_types) = &self.loan_types {
            if !loan_types.iter().any(|l| l == &record.loan_type) {
                return false;
            }
        }
        if let Some(min_dpd) = self.min_dpd {
            if record.dpd < min_dpd {
                return false;
            }
        }
        true
    }

    /// Build a spec from untyped `key=value` pairs, as supplied by a CLI flag
    /// or a query string. Inclusion values are comma-separated; an empty
    /// value is the explicit empty set. An unrecognized key is a caller
    /// error, never silently ignored.
    pub fn from_pairs<'a, I>(pairs: I) -> FlowenResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut spec = FilterSpec::default();
        for pair in pairs {
            let (key, value) = pair.split_once('=').ok_or_else(|| FlowenError::InvalidFilter {
                key: pair.to_string(),
                reason: "expected key=value".into(),
            })?;
            match key.trim() {
                "regions" | "region" => spec.regions = Some(split_values(value)),
                "loan_types" | "loan_type" => spec.loan_types = Some(split_values(value)),
                "min_dpd" => {
                    let parsed = value.trim().parse::<u32>().map_err(|_| {
                        FlowenError::InvalidFilter {
                            key: "min_dpd".into(),
                            reason: format!("'{}' is not a non-negative integer", value),
                        }
                    })?;
                    spec.min_dpd = Some(parsed);
                }
                other => {
                    return Err(FlowenError::InvalidFilter {
                        key: other.to_string(),
                        reason: "unrecognized filter key".into(),
                    })
                }
            }
        }
        Ok(spec)
    }
}

fn split_values(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reduce the dataset to rows matching the spec. Stable: survivors keep
/// their original relative order. Pure function of (records, spec).
pub fn filter(records: &[DebtorRecord], spec: &FilterSpec) -> Vec<DebtorRecord> {
    records
        .iter()
        .filter(|r| spec.matches(r))
        .cloned()
        .collect()
}
