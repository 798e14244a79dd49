use crate::schema::{FinancialYear, MonthlyRecord};
use serde::{Deserialize, Serialize};

/// Per-month derived figures. Net income equals operating income here: the
/// dataset carries no tax or interest lines, and the report states that
/// assumption rather than inventing adjustments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyMetrics {
    pub month: u32,
    pub revenue: f64,
    pub cogs: f64,
    pub gross_profit: f64,
    pub total_opex: f64,
    pub operating_income: f64,
    pub net_income: f64,
    pub marketing_spend: f64,
    pub customers: u64,
}

impl MonthlyMetrics {
    pub fn from_record(record: &MonthlyRecord) -> Self {
        let gross_profit = record.revenue - record.cogs;
        let total_opex = record.total_opex();
        let operating_income = gross_profit - total_opex;

        Self {
            month: record.month,
            revenue: record.revenue,
            cogs: record.cogs,
            gross_profit,
            total_opex,
            operating_income,
            net_income: operating_income,
            marketing_spend: record.marketing_spend(),
            customers: record.customers,
        }
    }
}

/// One pass over the year's records, in month order.
pub fn compute_metrics(year: &FinancialYear) -> Vec<MonthlyMetrics> {
    year.records.iter().map(MonthlyMetrics::from_record).collect()
}
