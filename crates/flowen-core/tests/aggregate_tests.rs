use flowen_core::query::{aggregate, cross_tab, top_n, GroupField, MetricField, MetricKind};
use flowen_core::{DebtorRecord, FlowenError, RiskLevel};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Aggregator: grouped counts/means/sums, cross tabs, stable top-N.
// ===========================================================================

fn rec(id: &str, dpd: u32, risk_level: RiskLevel, debt: Decimal) -> DebtorRecord {
    DebtorRecord {
        account_id: id.into(),
        name: format!("Debtor {id}"),
        region: "North".into(),
        loan_type: "Personal".into(),
        risk_score: dec!(50),
        ai_risk_score: dec!(50),
        risk_level,
        total_debt: debt,
        dpd,
        age: 40,
        monthly_income: dec!(20_000),
        contact_channel: "LINE".into(),
        response_behavior: "Responsive".into(),
        last_payment_date: None,
        last_payment_days_ago: None,
    }
}

#[test]
fn scenario_b_status_buckets_and_counts() {
    // dpd [0, 5, 35, 0] -> [Paid, In Progress, Stuck, Paid]
    let records = vec![
        rec("A-1", 0, RiskLevel::Low, dec!(1000)),
        rec("A-2", 5, RiskLevel::Low, dec!(1000)),
        rec("A-3", 35, RiskLevel::Low, dec!(1000)),
        rec("A-4", 0, RiskLevel::Low, dec!(1000)),
    ];
    let counts = aggregate(
        &records,
        GroupField::PaymentStatus,
        MetricField::Dpd,
        MetricKind::Count,
    )
    .unwrap();

    // First-seen order: Paid, In Progress, Stuck.
    assert_eq!(counts.len(), 3);
    assert_eq!(counts[0].key, "Paid");
    assert_eq!(counts[0].value, dec!(2));
    assert_eq!(counts[1].key, "In Progress");
    assert_eq!(counts[1].value, dec!(1));
    assert_eq!(counts[2].key, "Stuck");
    assert_eq!(counts[2].value, dec!(1));
}

#[test]
fn scenario_d_unobserved_group_is_absent_not_zero() {
    // No Low rows: the mean-by-risk-level result has no "Low" entry.
    let records = vec![
        rec("A-1", 10, RiskLevel::High, dec!(300)),
        rec("A-2", 10, RiskLevel::Medium, dec!(100)),
        rec("A-3", 10, RiskLevel::High, dec!(500)),
    ];
    let means = aggregate(
        &records,
        GroupField::RiskLevel,
        MetricField::TotalDebt,
        MetricKind::Mean,
    )
    .unwrap();

    assert!(means.iter().all(|g| g.key != "Low"));
    let high = means.iter().find(|g| g.key == "High").unwrap();
    assert_eq!(high.value, dec!(400));
}

#[test]
fn count_conservation_over_unfiltered_input() {
    let records: Vec<_> = (0..17)
        .map(|i| rec(&format!("A-{i}"), i % 40, RiskLevel::Medium, dec!(10)))
        .collect();
    let counts = aggregate(
        &records,
        GroupField::PaymentStatus,
        MetricField::Dpd,
        MetricKind::Count,
    )
    .unwrap();
    let total: Decimal = counts.iter().map(|g| g.value).sum();
    assert_eq!(total, Decimal::from(records.len() as u64));
}

#[test]
fn empty_input_yields_empty_result_not_error() {
    let result = aggregate(
        &[],
        GroupField::Region,
        MetricField::TotalDebt,
        MetricKind::Sum,
    )
    .unwrap();
    assert_eq!(result, vec![]);
}

#[test]
fn metric_missing_everywhere_is_a_caller_error() {
    let records = vec![rec("A-1", 0, RiskLevel::Low, dec!(10))];
    let err = aggregate(
        &records,
        GroupField::Region,
        MetricField::LastPaymentDaysAgo,
        MetricKind::Mean,
    )
    .unwrap_err();
    assert!(matches!(err, FlowenError::InvalidField(_)));
}

#[test]
fn sum_groups_keep_first_seen_order() {
    let records = vec![
        rec("A-1", 10, RiskLevel::High, dec!(100)),
        rec("A-2", 10, RiskLevel::Low, dec!(50)),
        rec("A-3", 10, RiskLevel::High, dec!(25)),
    ];
    let sums = aggregate(
        &records,
        GroupField::RiskLevel,
        MetricField::TotalDebt,
        MetricKind::Sum,
    )
    .unwrap();
    assert_eq!(sums[0].key, "High");
    assert_eq!(sums[0].value, dec!(125));
    assert_eq!(sums[1].key, "Low");
    assert_eq!(sums[1].value, dec!(50));
}

#[test]
fn cross_tab_counts_nested_pairs() {
    let mut a = rec("A-1", 10, RiskLevel::Low, dec!(10));
    a.contact_channel = "Voice".into();
    a.response_behavior = "Ignored".into();
    let mut b = rec("A-2", 10, RiskLevel::Low, dec!(10));
    b.contact_channel = "Voice".into();
    b.response_behavior = "Responsive".into();
    let mut c = rec("A-3", 10, RiskLevel::Low, dec!(10));
    c.contact_channel = "LINE".into();
    c.response_behavior = "Ignored".into();
    let mut d = rec("A-4", 10, RiskLevel::Low, dec!(10));
    d.contact_channel = "Voice".into();
    d.response_behavior = "Ignored".into();

    let cells = cross_tab(
        &[a, b, c, d],
        GroupField::ContactChannel,
        GroupField::ResponseBehavior,
    );

    // All Voice cells come before LINE (first-seen key_a order).
    assert_eq!(cells.len(), 3);
    assert_eq!((cells[0].key_a.as_str(), cells[0].key_b.as_str()), ("Voice", "Ignored"));
    assert_eq!(cells[0].count, 2);
    assert_eq!((cells[1].key_a.as_str(), cells[1].key_b.as_str()), ("Voice", "Responsive"));
    assert_eq!(cells[1].count, 1);
    assert_eq!((cells[2].key_a.as_str(), cells[2].key_b.as_str()), ("LINE", "Ignored"));
    assert_eq!(cells[2].count, 1);
}

#[test]
fn top_n_is_stable_under_ties() {
    let mut records = vec![
        rec("A-1", 0, RiskLevel::Low, dec!(10)),
        rec("A-2", 0, RiskLevel::Low, dec!(10)),
        rec("A-3", 0, RiskLevel::Low, dec!(10)),
        rec("A-4", 0, RiskLevel::Low, dec!(10)),
    ];
    records[0].ai_risk_score = dec!(70);
    records[1].ai_risk_score = dec!(90);
    records[2].ai_risk_score = dec!(90);
    records[3].ai_risk_score = dec!(70);

    let top = top_n(&records, 3, MetricField::AiRiskScore).unwrap();
    let ids: Vec<&str> = top.iter().map(|r| r.account_id.as_str()).collect();
    // Ties broken by original input order: A-2 before A-3, A-1 before A-4.
    assert_eq!(ids, vec!["A-2", "A-3", "A-1"]);

    // Repeated calls return the same ordering.
    let again = top_n(&records, 3, MetricField::AiRiskScore).unwrap();
    assert_eq!(top, again);
}

#[test]
fn top_n_larger_than_input_returns_everything() {
    let records = vec![
        rec("A-1", 0, RiskLevel::Low, dec!(10)),
        rec("A-2", 0, RiskLevel::Low, dec!(20)),
    ];
    let top = top_n(&records, 10, MetricField::TotalDebt).unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].account_id, "A-2");
}

#[test]
fn records_missing_the_metric_sort_last() {
    let mut records = vec![
        rec("A-1", 0, RiskLevel::Low, dec!(10)),
        rec("A-2", 0, RiskLevel::Low, dec!(10)),
    ];
    records[0].last_payment_days_ago = None;
    records[1].last_payment_days_ago = Some(3);
    let top = top_n(&records, 2, MetricField::LastPaymentDaysAgo).unwrap();
    assert_eq!(top[0].account_id, "A-2");
    assert_eq!(top[1].account_id, "A-1");
}
