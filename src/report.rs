use crate::error::Result;
use crate::schema::FinancialYear;
use crate::utils::{format_currency, format_opt_currency, format_pct, month_name};
use crate::{FinancialReport, ReportBuilder};

/// Builds the full report for a year and renders it as Markdown.
pub fn render_markdown(year: &FinancialYear) -> Result<String> {
    let report = ReportBuilder::build(year)?;
    Ok(render(&report, year))
}

/// Renders an already-built report. Undefined ratios appear as "n/a";
/// months with no data are listed, never zero-filled.
pub fn render(report: &FinancialReport, year: &FinancialYear) -> String {
    let mut out = String::new();
    let annual = &report.annual;

    let first_month = label(year.records.first().map(|r| r.month).unwrap_or(1));
    let last_month = label(year.records.last().map(|r| r.month).unwrap_or(12));

    out.push_str(&format!(
        "# Financial Report: {}\n\n{} to {} {} ({} month(s) of data)\n\n",
        annual.organization_name, first_month, last_month, annual.year, annual.months_covered
    ));

    // Executive summary
    out.push_str("## Executive Summary\n\n");
    out.push_str(&format!(
        "{} recorded {} in revenue against {} of COGS, for a gross profit of {} (gross margin {}). \
         Operating expenses totaled {}, leaving an operating income of {} (operating margin {}). \
         With no tax or interest lines in the data, net income equals operating income. \
         Overall, {}.\n\n",
        annual.organization_name,
        format_currency(annual.total_revenue),
        format_currency(annual.total_cogs),
        format_currency(annual.gross_profit),
        format_pct(annual.gross_margin),
        format_currency(annual.total_opex),
        format_currency(annual.operating_income),
        format_pct(annual.operating_margin),
        report.trend.describe(),
    ));

    // Monthly performance
    out.push_str("## Monthly Performance\n\n");
    out.push_str(
        "| Month | Revenue | COGS | Gross Profit | Gross Margin | OpEx | Operating Income | MoM Growth |\n",
    );
    out.push_str("|---|---|---|---|---|---|---|---|\n");
    for (m, r) in report.monthly.iter().zip(&report.ratios) {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
            label(m.month),
            format_currency(m.revenue),
            format_currency(m.cogs),
            format_currency(m.gross_profit),
            format_pct(r.gross_margin),
            format_currency(m.total_opex),
            format_currency(m.operating_income),
            format_pct(r.mom_growth),
        ));
    }
    out.push('\n');

    // Customer metrics
    out.push_str("## Customer Metrics\n\n");
    out.push_str("| Month | Customers | Net New | Marketing Spend | CAC |\n");
    out.push_str("|---|---|---|---|---|\n");
    for (m, r) in report.monthly.iter().zip(&report.ratios) {
        let net_new = r
            .net_new_customers
            .map(|n| n.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            label(m.month),
            m.customers,
            net_new,
            format_currency(m.marketing_spend),
            format_opt_currency(r.cac),
        ));
    }
    out.push('\n');

    // Annual summary
    out.push_str("## Annual Summary\n\n");
    out.push_str("| Metric | Value |\n|---|---|\n");
    out.push_str(&format!(
        "| Total Revenue | {} |\n",
        format_currency(annual.total_revenue)
    ));
    out.push_str(&format!(
        "| Total COGS | {} |\n",
        format_currency(annual.total_cogs)
    ));
    out.push_str(&format!(
        "| Gross Profit | {} |\n",
        format_currency(annual.gross_profit)
    ));
    out.push_str(&format!(
        "| Gross Margin | {} |\n",
        format_pct(annual.gross_margin)
    ));
    out.push_str(&format!(
        "| Total OpEx | {} |\n",
        format_currency(annual.total_opex)
    ));
    out.push_str(&format!(
        "| Operating Income | {} |\n",
        format_currency(annual.operating_income)
    ));
    out.push_str(&format!(
        "| Operating Margin | {} |\n",
        format_pct(annual.operating_margin)
    ));
    out.push_str(&format!("| Net Income | {} |\n", format_currency(annual.net_income)));
    out.push_str(&format!(
        "| Customers (start / end) | {} / {} |\n",
        annual.starting_customers, annual.ending_customers
    ));
    out.push_str(&format!(
        "| Net Customer Change | {} |\n",
        annual.net_customer_change
    ));
    out.push_str(&format!(
        "| Annual CAC | {} |\n",
        format_opt_currency(annual.annual_cac)
    ));
    out.push('\n');

    out.push_str("### Operating Expenses by Category\n\n");
    out.push_str("| Category | Total | Share of OpEx |\n|---|---|---|\n");
    for (category, amount) in &annual.opex_by_category {
        let share = if annual.total_opex > 0.0 {
            Some(amount / annual.total_opex)
        } else {
            None
        };
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            category,
            format_currency(*amount),
            format_pct(share),
        ));
    }
    out.push('\n');

    // Trends and observations
    out.push_str("## Trends & Observations\n\n");
    out.push_str(&format!("- Revenue trend: {}.\n", report.trend.describe()));
    if let Some(best) = annual.best_month {
        out.push_str(&format!(
            "- Strongest month: {} (operating income {}).\n",
            label(best),
            format_opt_currency(
                report
                    .monthly
                    .iter()
                    .find(|m| m.month == best)
                    .map(|m| m.operating_income)
            ),
        ));
    }
    if let Some(worst) = annual.worst_month {
        out.push_str(&format!(
            "- Weakest month: {} (operating income {}).\n",
            label(worst),
            format_opt_currency(
                report
                    .monthly
                    .iter()
                    .find(|m| m.month == worst)
                    .map(|m| m.operating_income)
            ),
        ));
    }
    if !annual.loss_months.is_empty() {
        let names: Vec<&str> = annual.loss_months.iter().map(|m| label(*m)).collect();
        out.push_str(&format!(
            "- Months with negative operating income: {}.\n",
            names.join(", ")
        ));
    }

    let missing = year.missing_months();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|m| label(*m)).collect();
        out.push_str(&format!(
            "- Data not available for: {}. Figures above cover only the reported months.\n",
            names.join(", ")
        ));
    }

    for r in &report.ratios {
        if r.gross_margin.is_none() {
            out.push_str(&format!(
                "- Margins are undefined for {} (no revenue recorded).\n",
                label(r.month)
            ));
        }
    }
    out.push('\n');

    // Recommendations
    out.push_str("## Strategic Recommendations\n\n");
    if report.recommendations.is_empty() {
        out.push_str("- No red flags triggered by the current figures. Maintain course and keep monitoring the same KPIs.\n");
    } else {
        for rec in &report.recommendations {
            out.push_str(&format!("- **{}**: {}\n", rec.title, rec.details));
        }
    }

    out
}

fn label(month: u32) -> &'static str {
    month_name(month).unwrap_or("Unknown")
}
