pub mod export;
pub mod query;
pub mod summary;

use clap::Args;

use flowen_core::loader::{self, LoadOutcome};
use flowen_core::query::{filter, FilterSpec};
use flowen_core::DebtorRecord;

use crate::input;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Filter flags shared by every query command. A JSON spec (file or piped
/// stdin) supplies the base; explicit flags override its fields.
#[derive(Args)]
pub struct FilterArgs {
    /// Restrict to these regions (repeatable)
    #[arg(long = "region", value_name = "REGION")]
    pub regions: Option<Vec<String>>,

    /// Restrict to these loan types (repeatable)
    #[arg(long = "loan-type", value_name = "LOAN_TYPE")]
    pub loan_types: Option<Vec<String>>,

    /// Keep rows with at least this many days past due
    #[arg(long)]
    pub min_dpd: Option<u32>,

    /// Raw key=value filter pair, e.g. regions=North,South (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub pairs: Vec<String>,

    /// Path to a JSON filter spec file
    #[arg(long)]
    pub spec: Option<String>,
}

impl FilterArgs {
    pub fn to_spec(&self) -> CliResult<FilterSpec> {
        let mut spec: FilterSpec = if let Some(ref path) = self.spec {
            input::file::read_json(path)?
        } else if let Some(value) = input::stdin::read_stdin()? {
            serde_json::from_value(value)?
        } else {
            FilterSpec::default()
        };

        if !self.pairs.is_empty() {
            let from_pairs = FilterSpec::from_pairs(self.pairs.iter().map(String::as_str))?;
            if from_pairs.regions.is_some() {
                spec.regions = from_pairs.regions;
            }
            if from_pairs.loan_types.is_some() {
                spec.loan_types = from_pairs.loan_types;
            }
            if from_pairs.min_dpd.is_some() {
                spec.min_dpd = from_pairs.min_dpd;
            }
        }

        if self.regions.is_some() {
            spec.regions = self.regions.clone();
        }
        if self.loan_types.is_some() {
            spec.loan_types = self.loan_types.clone();
        }
        if self.min_dpd.is_some() {
            spec.min_dpd = self.min_dpd;
        }
        Ok(spec)
    }
}

/// Load the dataset and apply the command's filter. Returns the surviving
/// records together with the load outcome so callers can surface the
/// skipped-row count instead of hiding it.
pub fn load_filtered(data: &str, args: &FilterArgs) -> CliResult<(Vec<DebtorRecord>, LoadOutcome)> {
    let outcome = loader::load_path(data)?;
    let spec = args.to_spec()?;
    let records = filter(&outcome.records, &spec);
    Ok((records, outcome))
}

/// "N of M rows skipped due to invalid data", or None when nothing was.
pub fn skip_note(outcome: &LoadOutcome) -> Option<String> {
    if outcome.rejected.is_empty() {
        None
    } else {
        Some(format!(
            "{} of {} rows skipped due to invalid data",
            outcome.rejected.len(),
            outcome.rows_seen()
        ))
    }
}
