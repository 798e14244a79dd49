use crate::metrics::MonthlyMetrics;
use serde::{Deserialize, Serialize};

/// Ratio fields are `None` when the denominator makes them undefined; the
/// renderer shows those as "n/a" and flags them in the narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyRatios {
    pub month: u32,
    pub gross_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    /// Revenue growth versus the previous calendar month. `None` for the
    /// first month, after a gap in the data, or when the prior revenue is 0.
    pub mom_growth: Option<f64>,
    /// Signed change in customer count versus the previous calendar month.
    pub net_new_customers: Option<i64>,
    pub cac: Option<f64>,
}

pub fn gross_margin(gross_profit: f64, revenue: f64) -> Option<f64> {
    if revenue == 0.0 {
        None
    } else {
        Some(gross_profit / revenue)
    }
}

pub fn operating_margin(operating_income: f64, revenue: f64) -> Option<f64> {
    if revenue == 0.0 {
        None
    } else {
        Some(operating_income / revenue)
    }
}

pub fn mom_growth(prev_revenue: f64, revenue: f64) -> Option<f64> {
    if prev_revenue == 0.0 {
        None
    } else {
        Some((revenue - prev_revenue) / prev_revenue)
    }
}

/// CAC = marketing spend / net new customers, falling back to the current
/// month's total customers when no net customers were added. `None` when the
/// chosen denominator is still zero.
pub fn cac(marketing_spend: f64, net_new_customers: Option<i64>, customers: u64) -> Option<f64> {
    let denominator = match net_new_customers {
        Some(n) if n > 0 => n as f64,
        _ => customers as f64,
    };

    if denominator == 0.0 {
        None
    } else {
        Some(marketing_spend / denominator)
    }
}

/// Computes ratios for each month. Growth and customer deltas are only taken
/// between consecutive calendar months; a gap breaks the chain.
pub fn compute_ratios(metrics: &[MonthlyMetrics]) -> Vec<MonthlyRatios> {
    metrics
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let prev = if i > 0 { Some(&metrics[i - 1]) } else { None };
            let consecutive_prev = prev.filter(|p| p.month + 1 == m.month);

            let growth = consecutive_prev.and_then(|p| mom_growth(p.revenue, m.revenue));
            let net_new =
                consecutive_prev.map(|p| m.customers as i64 - p.customers as i64);

            MonthlyRatios {
                month: m.month,
                gross_margin: gross_margin(m.gross_profit, m.revenue),
                operating_margin: operating_margin(m.operating_income, m.revenue),
                mom_growth: growth,
                net_new_customers: net_new,
                cac: cac(m.marketing_spend, net_new, m.customers),
            }
        })
        .collect()
}
