//! # Financial Report Builder
//!
//! A library for turning a year of monthly financial and customer figures
//! into a KPI report: derived metrics, guarded ratios, an annual summary,
//! trend classification, rule-based recommendations, and a rendered
//! Markdown report.
//!
//! ## Core Concepts
//!
//! - **MonthlyRecord**: the raw figures for one month (revenue, COGS, opex
//!   categories, customer count)
//! - **Derived metrics**: gross profit, total opex, operating income, per
//!   month and summed annually
//! - **Guarded ratios**: margins, MoM growth, and CAC return `None` rather
//!   than dividing by zero; the report renders those as "n/a"
//! - **Annual ratios**: always computed from the summed figures, never by
//!   averaging monthly ratios
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_report_builder::*;
//! use std::collections::BTreeMap;
//!
//! let year = FinancialYear::new(
//!     "ACME Corp",
//!     2024,
//!     vec![MonthlyRecord {
//!         month: 1,
//!         revenue: 42_000.0,
//!         cogs: 18_000.0,
//!         operating_expenses: BTreeMap::from([
//!             ("Salaries".to_string(), 12_000.0),
//!             ("Marketing".to_string(), 2_800.0),
//!         ]),
//!         customers: 310,
//!     }],
//! )?;
//!
//! let markdown = render_markdown(&year)?;
//! println!("{}", markdown);
//! ```

pub mod advice;
pub mod annual;
pub mod error;
pub mod ingestion;
pub mod metrics;
pub mod ratios;
pub mod report;
pub mod schema;
pub mod trend;
pub mod utils;

#[cfg(feature = "ollama")]
pub mod llm;

pub use advice::{recommend, Recommendation};
pub use annual::AnnualSummary;
pub use error::{FinancialReportError, Result};
pub use ingestion::parse_markdown_table;
pub use metrics::{compute_metrics, MonthlyMetrics};
pub use ratios::{compute_ratios, MonthlyRatios};
pub use report::render_markdown;
pub use schema::{FinancialYear, MonthlyRecord};
pub use trend::{classify_revenue_trend, RevenueTrend};
pub use utils::*;

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Everything derived from one year of records, ready for rendering or
/// serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialReport {
    pub monthly: Vec<MonthlyMetrics>,
    pub ratios: Vec<MonthlyRatios>,
    pub annual: AnnualSummary,
    pub trend: RevenueTrend,
    pub recommendations: Vec<Recommendation>,
}

pub struct ReportBuilder;

impl ReportBuilder {
    pub fn build(year: &FinancialYear) -> Result<FinancialReport> {
        // Years built by deserialization skip the constructor's checks
        year.validate()?;

        info!(
            "Building financial report for organization: {}",
            year.organization_name
        );
        debug!(
            "Dataset covers {} month(s); {} missing within the covered range",
            year.records.len(),
            year.missing_months().len()
        );

        let monthly = compute_metrics(year);
        let ratios = compute_ratios(&monthly);
        let annual = AnnualSummary::from_year(year, &monthly);
        let trend = classify_revenue_trend(&ratios);
        let recommendations = recommend(&annual, &monthly, &ratios);

        debug!(
            "Report built: trend {:?}, {} recommendation(s)",
            trend,
            recommendations.len()
        );

        Ok(FinancialReport {
            monthly,
            ratios,
            annual,
            trend,
            recommendations,
        })
    }
}

pub fn build_report(year: &FinancialYear) -> Result<FinancialReport> {
    ReportBuilder::build(year)
}
