use financial_report_builder::*;
use std::collections::BTreeMap;

const TOLERANCE: f64 = 1e-9;

/// A synthetic but plausible 12-month SaaS-flavored dataset: growing
/// revenue, a slow summer, and steadily rising marketing spend.
fn synthetic_year() -> FinancialYear {
    let mut records = Vec::new();
    for month in 1..=12u32 {
        let seasonal_dip = if month == 7 || month == 8 { 0.9 } else { 1.0 };
        let revenue = (38_000.0 + month as f64 * 1_400.0) * seasonal_dip;
        records.push(MonthlyRecord {
            month,
            revenue,
            cogs: revenue * 0.38,
            operating_expenses: BTreeMap::from([
                ("Salaries".to_string(), 13_000.0),
                ("Rent".to_string(), 3_200.0),
                ("Software".to_string(), 900.0),
                ("Marketing".to_string(), 2_400.0 + month as f64 * 150.0),
            ]),
            customers: 280 + month as u64 * 18,
        });
    }
    FinancialYear::new("Synthetic SaaS Ltd", 2024, records).unwrap()
}

#[test]
fn monthly_arithmetic_identities_hold() {
    let year = synthetic_year();
    let report = build_report(&year).unwrap();

    for (record, m) in year.records.iter().zip(&report.monthly) {
        assert!(
            (m.gross_profit - (record.revenue - record.cogs)).abs() < TOLERANCE,
            "gross profit identity failed for month {}",
            m.month
        );

        let opex: f64 = record.operating_expenses.values().sum();
        assert!((m.total_opex - opex).abs() < TOLERANCE);
        assert!((m.operating_income - (m.gross_profit - m.total_opex)).abs() < TOLERANCE);
        assert!((m.net_income - m.operating_income).abs() < TOLERANCE);
    }
}

#[test]
fn annual_totals_are_sums_of_monthly_figures() {
    let year = synthetic_year();
    let report = build_report(&year).unwrap();
    let annual = &report.annual;

    let revenue_sum: f64 = year.records.iter().map(|r| r.revenue).sum();
    let cogs_sum: f64 = year.records.iter().map(|r| r.cogs).sum();

    assert!((annual.total_revenue - revenue_sum).abs() < TOLERANCE);
    assert!((annual.total_cogs - cogs_sum).abs() < TOLERANCE);
    assert!((annual.gross_profit - (revenue_sum - cogs_sum)).abs() < TOLERANCE);

    let category_sum: f64 = annual.opex_by_category.values().sum();
    assert!((annual.total_opex - category_sum).abs() < TOLERANCE);
}

#[test]
fn annual_ratios_come_from_sums() {
    let year = synthetic_year();
    let report = build_report(&year).unwrap();
    let annual = &report.annual;

    let expected_gross_margin = annual.gross_profit / annual.total_revenue;
    assert!((annual.gross_margin.unwrap() - expected_gross_margin).abs() < TOLERANCE);

    let expected_operating_margin = annual.operating_income / annual.total_revenue;
    assert!((annual.operating_margin.unwrap() - expected_operating_margin).abs() < TOLERANCE);

    // Operating margins differ month to month (fixed opex against varying
    // revenue), so an averaged figure would not match the sums-based one.
    let averaged: f64 = report
        .ratios
        .iter()
        .filter_map(|r| r.operating_margin)
        .sum::<f64>()
        / report.ratios.len() as f64;
    assert!((averaged - expected_operating_margin).abs() > 1e-6);
}

#[test]
fn mom_growth_matches_formula() {
    let year = synthetic_year();
    let report = build_report(&year).unwrap();

    assert_eq!(report.ratios[0].mom_growth, None);

    for window in year.records.windows(2) {
        let (prev, curr) = (&window[0], &window[1]);
        let expected = (curr.revenue - prev.revenue) / prev.revenue;
        let actual = report
            .ratios
            .iter()
            .find(|r| r.month == curr.month)
            .and_then(|r| r.mom_growth)
            .unwrap();
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "MoM growth mismatch for month {}",
            curr.month
        );
    }
}

#[test]
fn cac_uses_net_new_customers_with_fallback() {
    let year = synthetic_year();
    let report = build_report(&year).unwrap();

    // Months 2..=12 add 18 customers each
    for r in report.ratios.iter().skip(1) {
        assert_eq!(r.net_new_customers, Some(18));
        let marketing = 2_400.0 + r.month as f64 * 150.0;
        assert!((r.cac.unwrap() - marketing / 18.0).abs() < TOLERANCE);
    }

    // First month: no delta, denominator falls back to the customer count
    let first = &report.ratios[0];
    assert_eq!(first.net_new_customers, None);
    assert!((first.cac.unwrap() - 2_550.0 / 298.0).abs() < TOLERANCE);
}

#[test]
fn flat_customer_month_falls_back_to_current_count() {
    let records = vec![
        MonthlyRecord {
            month: 1,
            revenue: 10_000.0,
            cogs: 4_000.0,
            operating_expenses: BTreeMap::from([("Marketing".to_string(), 1_000.0)]),
            customers: 100,
        },
        MonthlyRecord {
            month: 2,
            revenue: 10_500.0,
            cogs: 4_100.0,
            operating_expenses: BTreeMap::from([("Marketing".to_string(), 1_000.0)]),
            customers: 100,
        },
    ];
    let year = FinancialYear::new("Flat Co", 2024, records).unwrap();
    let report = build_report(&year).unwrap();

    let feb = &report.ratios[1];
    assert_eq!(feb.net_new_customers, Some(0));
    assert!((feb.cac.unwrap() - 10.0).abs() < TOLERANCE);
}

#[test]
fn zero_revenue_month_flags_ratios_not_panics() {
    let records = vec![
        MonthlyRecord {
            month: 1,
            revenue: 0.0,
            cogs: 0.0,
            operating_expenses: BTreeMap::from([("Marketing".to_string(), 500.0)]),
            customers: 0,
        },
        MonthlyRecord {
            month: 2,
            revenue: 8_000.0,
            cogs: 3_000.0,
            operating_expenses: BTreeMap::from([("Marketing".to_string(), 500.0)]),
            customers: 40,
        },
    ];
    let year = FinancialYear::new("Launch Co", 2024, records).unwrap();
    let report = build_report(&year).unwrap();

    let jan = &report.ratios[0];
    assert_eq!(jan.gross_margin, None);
    assert_eq!(jan.operating_margin, None);
    assert_eq!(jan.cac, None, "CAC with zero customers must be undefined");

    let feb = &report.ratios[1];
    assert_eq!(feb.mom_growth, None, "growth from zero revenue is undefined");

    let markdown = render_markdown(&year).unwrap();
    assert!(markdown.contains("n/a"));
    assert!(markdown.contains("Margins are undefined for January"));
}

#[test]
fn table_ingestion_feeds_the_full_pipeline() {
    let table = "\
| Month | Revenue | COGS | Salaries | Rent | Marketing | Customers |
|-------|---------|------|----------|------|-----------|-----------|
| Jan | $42,000 | $18,000 | $12,000 | $3,500 | $2,800 | 310 |
| Feb | $45,500 | $19,200 | $12,000 | $3,500 | $3,100 | 334 |
| Mar | $43,800 | $18,700 | $12,400 | $3,500 | $2,900 | 329 |
| Apr | $48,900 | $20,100 | $12,400 | $3,500 | $3,400 | 351 |
";

    let year = parse_markdown_table(table, "Tabular Co", 2024).unwrap();
    let report = build_report(&year).unwrap();

    assert_eq!(report.annual.months_covered, 4);
    assert!((report.annual.total_revenue - 180_200.0).abs() < 1e-6);

    let feb = report.ratios.iter().find(|r| r.month == 2).unwrap();
    assert_eq!(feb.net_new_customers, Some(24));
    assert!((feb.cac.unwrap() - 3_100.0 / 24.0).abs() < 1e-9);

    let markdown = render_markdown(&year).unwrap();
    assert!(markdown.contains("Tabular Co"));
    assert!(markdown.contains("| February |"));
}

#[test]
fn missing_months_are_reported_not_invented() {
    let mut records = Vec::new();
    for month in [1u32, 2, 3, 6, 7] {
        records.push(MonthlyRecord {
            month,
            revenue: 20_000.0,
            cogs: 8_000.0,
            operating_expenses: BTreeMap::from([("Marketing".to_string(), 1_500.0)]),
            customers: 150,
        });
    }
    let year = FinancialYear::new("Patchy Co", 2024, records).unwrap();

    assert_eq!(year.missing_months(), vec![4, 5]);

    let report = build_report(&year).unwrap();
    assert_eq!(report.monthly.len(), 5);

    // June follows a gap, so it has no growth figure
    let june = report.ratios.iter().find(|r| r.month == 6).unwrap();
    assert_eq!(june.mom_growth, None);

    let markdown = render_markdown(&year).unwrap();
    assert!(markdown.contains("Data not available for: April, May"));
    assert!(!markdown.contains("| April |"));
}

#[test]
fn struggling_business_gets_recommendations() {
    let mut records = Vec::new();
    for month in 1..=6u32 {
        let revenue = 30_000.0 - (month as f64 - 1.0) * 2_000.0;
        records.push(MonthlyRecord {
            month,
            revenue,
            cogs: revenue * 0.82,
            operating_expenses: BTreeMap::from([
                ("Salaries".to_string(), 9_000.0),
                ("Marketing".to_string(), 2_000.0 + month as f64 * 400.0),
            ]),
            customers: (300 - month * 12) as u64,
        });
    }
    let year = FinancialYear::new("Headwinds Co", 2024, records).unwrap();
    let report = build_report(&year).unwrap();

    assert_eq!(report.trend, RevenueTrend::Declining);
    assert!(!report.recommendations.is_empty());

    let titles: Vec<&str> = report
        .recommendations
        .iter()
        .map(|r| r.title.as_str())
        .collect();
    assert!(titles.contains(&"Improve gross margin"));
    assert!(titles.contains(&"Address customer churn"));
    // Marketing spend more than doubles while the customer base shrinks,
    // so acquisition cost degrades and opex outgrows revenue
    assert!(titles.contains(&"Investigate rising acquisition cost"));
    assert!(titles.contains(&"Contain operating expense growth"));

    let markdown = render_markdown(&year).unwrap();
    assert!(markdown.contains("## Strategic Recommendations"));
    assert!(markdown.contains("Improve gross margin"));
}

#[test]
fn report_json_round_trip() {
    let year = synthetic_year();
    let report = build_report(&year).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let back: FinancialReport = serde_json::from_str(&json).unwrap();

    assert_eq!(back.monthly.len(), report.monthly.len());
    assert!((back.annual.total_revenue - report.annual.total_revenue).abs() < TOLERANCE);
    assert_eq!(back.trend, report.trend);
}
