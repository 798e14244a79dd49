use crate::error::{FinancialReportError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MonthlyRecord {
    #[schemars(description = "Calendar month ordinal (1 = January, 12 = December)")]
    pub month: u32,

    #[schemars(description = "Total revenue recognized during the month")]
    pub revenue: f64,

    #[schemars(description = "Cost of goods sold for the month (direct costs only)")]
    pub cogs: f64,

    #[schemars(
        description = "Operating expenses keyed by category name (e.g. 'Salaries', 'Rent', 'Marketing'). Categories vary freely between businesses; the category whose name contains 'marketing' feeds the CAC calculation."
    )]
    pub operating_expenses: BTreeMap<String, f64>,

    #[schemars(description = "Total customer count at the end of the month")]
    pub customers: u64,
}

impl MonthlyRecord {
    /// Sum of opex categories whose name contains "marketing" (case-insensitive).
    pub fn marketing_spend(&self) -> f64 {
        self.operating_expenses
            .iter()
            .filter(|(name, _)| name.to_lowercase().contains("marketing"))
            .map(|(_, amount)| amount)
            .sum()
    }

    pub fn total_opex(&self) -> f64 {
        self.operating_expenses.values().sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FinancialYear {
    #[schemars(description = "The legal name of the organization/business")]
    pub organization_name: String,

    #[schemars(description = "Calendar year the records belong to (e.g. 2024)")]
    pub year: i32,

    #[schemars(
        description = "Monthly records, at most one per calendar month. Months with no data are simply absent; they are reported as missing rather than treated as zero."
    )]
    pub records: Vec<MonthlyRecord>,
}

impl FinancialYear {
    /// Builds a validated year of records, sorted by month.
    pub fn new(
        organization_name: impl Into<String>,
        year: i32,
        mut records: Vec<MonthlyRecord>,
    ) -> Result<Self> {
        records.sort_by_key(|r| r.month);

        let built = Self {
            organization_name: organization_name.into(),
            year,
            records,
        };
        built.validate()?;
        Ok(built)
    }

    /// Re-checks the invariants `new` enforces: at least one record, months
    /// in 1..=12 with no duplicates, no negative amounts. Deserialization
    /// bypasses the constructor, so callers consuming external JSON should
    /// run this (the report builder does).
    pub fn validate(&self) -> Result<()> {
        if self.records.is_empty() {
            return Err(FinancialReportError::EmptyDataset(
                self.organization_name.clone(),
            ));
        }

        let mut seen = [false; 12];
        for record in &self.records {
            if !(1..=12).contains(&record.month) {
                return Err(FinancialReportError::InvalidMonth(record.month));
            }
            let idx = (record.month - 1) as usize;
            if seen[idx] {
                return Err(FinancialReportError::DuplicateMonth(record.month));
            }
            seen[idx] = true;

            validate_non_negative(record.month, "revenue", record.revenue)?;
            validate_non_negative(record.month, "COGS", record.cogs)?;
            for (category, amount) in &record.operating_expenses {
                validate_non_negative(record.month, category, *amount)?;
            }
        }

        Ok(())
    }

    pub fn record_for(&self, month: u32) -> Option<&MonthlyRecord> {
        self.records.iter().find(|r| r.month == month)
    }

    /// Months between the first and last covered month that have no record.
    pub fn missing_months(&self) -> Vec<u32> {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => (first.month..=last.month)
                .filter(|m| self.record_for(*m).is_none())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// All opex category names appearing anywhere in the year, sorted.
    pub fn expense_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .records
            .iter()
            .flat_map(|r| r.operating_expenses.keys().cloned())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(FinancialYear)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

fn validate_non_negative(month: u32, field: &str, value: f64) -> Result<()> {
    if value < 0.0 {
        return Err(FinancialReportError::NegativeAmount {
            month,
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
