use crate::metrics::MonthlyMetrics;
use crate::ratios;
use crate::schema::FinancialYear;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Annual figures reduced from the monthly records. Ratios are computed from
/// the summed figures, never by averaging the monthly ratios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualSummary {
    pub organization_name: String,
    pub year: i32,
    pub months_covered: usize,

    pub total_revenue: f64,
    pub total_cogs: f64,
    pub gross_profit: f64,
    pub total_opex: f64,
    pub opex_by_category: BTreeMap<String, f64>,
    pub operating_income: f64,
    pub net_income: f64,
    pub total_marketing_spend: f64,

    pub starting_customers: u64,
    pub ending_customers: u64,
    pub net_customer_change: i64,

    pub gross_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    pub annual_cac: Option<f64>,

    /// Month ordinals with the highest and lowest operating income.
    pub best_month: Option<u32>,
    pub worst_month: Option<u32>,
    /// Months that closed with negative operating income, in order.
    pub loss_months: Vec<u32>,
}

impl AnnualSummary {
    pub fn from_year(year: &FinancialYear, metrics: &[MonthlyMetrics]) -> Self {
        let total_revenue: f64 = metrics.iter().map(|m| m.revenue).sum();
        let total_cogs: f64 = metrics.iter().map(|m| m.cogs).sum();
        let gross_profit = total_revenue - total_cogs;
        let total_opex: f64 = metrics.iter().map(|m| m.total_opex).sum();
        let operating_income = gross_profit - total_opex;
        let total_marketing_spend: f64 = metrics.iter().map(|m| m.marketing_spend).sum();

        let mut opex_by_category: BTreeMap<String, f64> = BTreeMap::new();
        for record in &year.records {
            for (category, amount) in &record.operating_expenses {
                *opex_by_category.entry(category.clone()).or_insert(0.0) += amount;
            }
        }

        let starting_customers = metrics.first().map(|m| m.customers).unwrap_or(0);
        let ending_customers = metrics.last().map(|m| m.customers).unwrap_or(0);
        let net_customer_change = ending_customers as i64 - starting_customers as i64;

        let best_month = metrics
            .iter()
            .max_by(|a, b| a.operating_income.total_cmp(&b.operating_income))
            .map(|m| m.month);
        let worst_month = metrics
            .iter()
            .min_by(|a, b| a.operating_income.total_cmp(&b.operating_income))
            .map(|m| m.month);
        let loss_months = metrics
            .iter()
            .filter(|m| m.operating_income < 0.0)
            .map(|m| m.month)
            .collect();

        Self {
            organization_name: year.organization_name.clone(),
            year: year.year,
            months_covered: metrics.len(),
            total_revenue,
            total_cogs,
            gross_profit,
            total_opex,
            opex_by_category,
            operating_income,
            net_income: operating_income,
            total_marketing_spend,
            starting_customers,
            ending_customers,
            net_customer_change,
            gross_margin: ratios::gross_margin(gross_profit, total_revenue),
            operating_margin: ratios::operating_margin(operating_income, total_revenue),
            annual_cac: ratios::cac(
                total_marketing_spend,
                Some(net_customer_change),
                ending_customers,
            ),
            best_month,
            worst_month,
            loss_months,
        }
    }
}
