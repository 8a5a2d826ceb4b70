use flowen_core::query::{filter, FilterSpec};
use flowen_core::{DebtorRecord, RiskLevel};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

// ===========================================================================
// Predicate filter: AND combination, stability, and the empty-set convention.
// ===========================================================================

fn rec(id: &str, region: &str, loan_type: &str, dpd: u32) -> DebtorRecord {
    DebtorRecord {
        account_id: id.into(),
        name: format!("Debtor {id}"),
        region: region.into(),
        loan_type: loan_type.into(),
        risk_score: dec!(50),
        ai_risk_score: dec!(50),
        risk_level: RiskLevel::Medium,
        total_debt: dec!(100_000),
        dpd,
        age: 40,
        monthly_income: dec!(20_000),
        contact_channel: "LINE".into(),
        response_behavior: "Responsive".into(),
        last_payment_date: None,
        last_payment_days_ago: None,
    }
}

fn dataset() -> Vec<DebtorRecord> {
    vec![
        rec("A-1", "North", "Personal", 0),
        rec("A-2", "South", "Auto", 5),
        rec("A-3", "North", "Mortgage", 35),
        rec("A-4", "East", "Personal", 60),
    ]
}

fn ids(records: &[DebtorRecord]) -> Vec<&str> {
    records.iter().map(|r| r.account_id.as_str()).collect()
}

#[test]
fn scenario_a_region_inclusion_preserves_order() {
    // 3 rows, regions [North, South, North], filter {North} -> rows 1 and 3.
    let records = vec![
        rec("A-1", "North", "Personal", 0),
        rec("A-2", "South", "Personal", 0),
        rec("A-3", "North", "Personal", 0),
    ];
    let spec = FilterSpec {
        regions: Some(vec!["North".into()]),
        ..Default::default()
    };
    assert_eq!(ids(&filter(&records, &spec)), vec!["A-1", "A-3"]);
}

#[test]
fn scenario_c_explicit_empty_set_matches_nothing() {
    let spec = FilterSpec {
        regions: Some(vec![]),
        ..Default::default()
    };
    assert_eq!(filter(&dataset(), &spec), vec![]);
}

#[test]
fn absent_constraints_pass_everything() {
    let all = filter(&dataset(), &FilterSpec::default());
    assert_eq!(all, dataset());
}

#[test]
fn constraints_combine_with_and() {
    let spec = FilterSpec {
        regions: Some(vec!["North".into()]),
        loan_types: None,
        min_dpd: Some(30),
    };
    assert_eq!(ids(&filter(&dataset(), &spec)), vec!["A-3"]);
}

#[test]
fn filter_is_idempotent() {
    let spec = FilterSpec {
        regions: Some(vec!["North".into(), "East".into()]),
        loan_types: Some(vec!["Personal".into()]),
        min_dpd: Some(1),
    };
    let once = filter(&dataset(), &spec);
    let twice = filter(&once, &spec);
    assert_eq!(once, twice);
}

#[test]
fn composed_spec_equals_intersection_of_parts() {
    let records = dataset();
    let combined = FilterSpec {
        regions: Some(vec!["North".into(), "East".into()]),
        loan_types: None,
        min_dpd: Some(30),
    };
    let by_region = filter(
        &records,
        &FilterSpec {
            regions: Some(vec!["North".into(), "East".into()]),
            ..Default::default()
        },
    );
    let by_dpd = filter(
        &records,
        &FilterSpec {
            min_dpd: Some(30),
            ..Default::default()
        },
    );

    let intersection: Vec<&str> = ids(&by_region)
        .into_iter()
        .filter(|id| ids(&by_dpd).contains(id))
        .collect();
    assert_eq!(ids(&filter(&records, &combined)), intersection);
}

#[test]
fn unknown_category_matches_zero_rows_without_error() {
    let spec = FilterSpec {
        regions: Some(vec!["Atlantis".into()]),
        ..Default::default()
    };
    assert_eq!(filter(&dataset(), &spec), vec![]);
}

#[test]
fn min_dpd_is_inclusive() {
    let spec = FilterSpec {
        min_dpd: Some(35),
        ..Default::default()
    };
    assert_eq!(ids(&filter(&dataset(), &spec)), vec!["A-3", "A-4"]);
}

#[test]
fn filter_spec_round_trips_through_json() {
    // The bindings and CLI surfaces ship specs as JSON.
    let spec = FilterSpec {
        regions: Some(vec!["North".into()]),
        loan_types: Some(vec![]),
        min_dpd: Some(7),
    };
    let json = serde_json::to_string(&spec).unwrap();
    let back: FilterSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(spec, back);
}

#[test]
fn json_spec_with_unknown_key_is_rejected() {
    // A misspelled constraint must fail loudly, not fall back to "match all".
    let err = serde_json::from_str::<FilterSpec>(r#"{"regons": ["North"]}"#);
    assert!(err.is_err());

    let err = serde_json::from_str::<FilterSpec>(r#"{"regions": ["North"], "channel": "LINE"}"#);
    assert!(err.is_err());
}
