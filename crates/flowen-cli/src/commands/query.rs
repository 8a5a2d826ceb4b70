use clap::Args;
use serde_json::{json, Value};

use flowen_core::query::{aggregate, cross_tab, top_n, GroupField, MetricField, MetricKind};

use super::{load_filtered, skip_note, FilterArgs};

type CliResult = Result<Value, Box<dyn std::error::Error>>;

/// Arguments for listing filtered records
#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Show at most this many rows
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for grouped aggregation
#[derive(Args)]
pub struct AggregateArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Field to group by (region, loan_type, risk_level, contact_channel,
    /// response_behavior, age_group, payment_status)
    #[arg(long)]
    pub group_by: String,

    /// Numeric field to reduce; ignored for --kind count
    #[arg(long, default_value = "total_debt")]
    pub metric: String,

    /// Reduction: count, mean, or sum
    #[arg(long, default_value = "count")]
    pub kind: String,
}

/// Arguments for a two-key cross tabulation
#[derive(Args)]
pub struct CrosstabArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// First (outer) grouping field
    #[arg(long)]
    pub rows: String,

    /// Second (inner) grouping field
    #[arg(long)]
    pub cols: String,
}

/// Arguments for the top-N ranking
#[derive(Args)]
pub struct TopArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// How many accounts to return
    #[arg(long, default_value_t = 5)]
    pub n: usize,

    /// Numeric field to rank by
    #[arg(long, default_value = "ai_risk_score")]
    pub by: String,
}

pub fn run_list(data: &str, args: ListArgs) -> CliResult {
    let (mut records, outcome) = load_filtered(data, &args.filter)?;
    let matched = records.len();
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    let mut envelope = json!({
        "records": records,
        "count": matched,
    });
    if let Some(note) = skip_note(&outcome) {
        envelope["note"] = Value::String(note);
    }
    Ok(envelope)
}

pub fn run_aggregate(data: &str, args: AggregateArgs) -> CliResult {
    let (records, outcome) = load_filtered(data, &args.filter)?;
    let group: GroupField = args.group_by.parse()?;
    let metric: MetricField = args.metric.parse()?;
    let kind: MetricKind = args.kind.parse()?;
    let groups = aggregate(&records, group, metric, kind)?;

    let mut envelope = json!({
        "group_by": group,
        "metric": metric,
        "kind": kind,
        "groups": groups,
    });
    if let Some(note) = skip_note(&outcome) {
        envelope["note"] = Value::String(note);
    }
    Ok(envelope)
}

pub fn run_crosstab(data: &str, args: CrosstabArgs) -> CliResult {
    let (records, outcome) = load_filtered(data, &args.filter)?;
    let rows: GroupField = args.rows.parse()?;
    let cols: GroupField = args.cols.parse()?;
    let cells = cross_tab(&records, rows, cols);

    let mut envelope = json!({
        "rows": rows,
        "cols": cols,
        "cells": cells,
    });
    if let Some(note) = skip_note(&outcome) {
        envelope["note"] = Value::String(note);
    }
    Ok(envelope)
}

pub fn run_top(data: &str, args: TopArgs) -> CliResult {
    let (records, outcome) = load_filtered(data, &args.filter)?;
    let by: MetricField = args.by.parse()?;
    let ranked = top_n(&records, args.n, by)?;
    let count = ranked.len();

    let mut envelope = json!({
        "by": by,
        "n": args.n,
        "records": ranked,
        "count": count,
    });
    if let Some(note) = skip_note(&outcome) {
        envelope["note"] = Value::String(note);
    }
    Ok(envelope)
}
