use crate::annual::AnnualSummary;
use crate::metrics::MonthlyMetrics;
use crate::ratios::MonthlyRatios;
use crate::utils::{format_currency, format_pct, month_name};
use serde::{Deserialize, Serialize};

const LOW_GROSS_MARGIN: f64 = 0.30;
const OPEX_OUTPACE_MARGIN: f64 = 0.05;
const CAC_RISE_FACTOR: f64 = 1.25;
const OPEX_CONCENTRATION: f64 = 0.50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub details: String,
}

/// Rule-based strategic recommendations. Each rule fires from a concrete
/// numeric condition and cites the figures that triggered it; the output
/// order is fixed so reports are deterministic.
pub fn recommend(
    annual: &AnnualSummary,
    metrics: &[MonthlyMetrics],
    ratios: &[MonthlyRatios],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if let Some(margin) = annual.gross_margin {
        if margin < LOW_GROSS_MARGIN {
            recommendations.push(Recommendation {
                title: "Improve gross margin".to_string(),
                details: format!(
                    "Annual gross margin is {} (below the {} healthy floor). Review pricing and direct costs: COGS consumed {} of {} revenue.",
                    format_pct(Some(margin)),
                    format_pct(Some(LOW_GROSS_MARGIN)),
                    format_currency(annual.total_cogs),
                    format_currency(annual.total_revenue),
                ),
            });
        }
    }

    if let Some(rec) = opex_outpacing_revenue(metrics) {
        recommendations.push(rec);
    }

    if let Some(rec) = rising_cac(ratios) {
        recommendations.push(rec);
    }

    if let Some(rec) = consecutive_losses(annual) {
        recommendations.push(rec);
    }

    if annual.net_customer_change < 0 {
        recommendations.push(Recommendation {
            title: "Address customer churn".to_string(),
            details: format!(
                "The customer base shrank from {} to {} over the period ({} net). Acquisition spend of {} is working against attrition; prioritize retention.",
                annual.starting_customers,
                annual.ending_customers,
                annual.net_customer_change,
                format_currency(annual.total_marketing_spend),
            ),
        });
    }

    if let Some(rec) = opex_concentration(annual) {
        recommendations.push(rec);
    }

    recommendations
}

fn opex_outpacing_revenue(metrics: &[MonthlyMetrics]) -> Option<Recommendation> {
    let first = metrics.first()?;
    let last = metrics.last()?;
    if metrics.len() < 2 || first.revenue == 0.0 || first.total_opex == 0.0 {
        return None;
    }

    let revenue_growth = (last.revenue - first.revenue) / first.revenue;
    let opex_growth = (last.total_opex - first.total_opex) / first.total_opex;

    if opex_growth > revenue_growth + OPEX_OUTPACE_MARGIN {
        Some(Recommendation {
            title: "Contain operating expense growth".to_string(),
            details: format!(
                "Operating expenses grew {} across the period while revenue grew {}. Costs are scaling faster than the business; audit the fastest-growing categories.",
                format_pct(Some(opex_growth)),
                format_pct(Some(revenue_growth)),
            ),
        })
    } else {
        None
    }
}

fn rising_cac(ratios: &[MonthlyRatios]) -> Option<Recommendation> {
    // The first covered month has no customer delta and falls back to the
    // total-customer denominator, which would skew the comparison; skip it.
    let defined: Vec<(u32, f64)> = ratios
        .iter()
        .filter(|r| r.net_new_customers.is_some())
        .filter_map(|r| r.cac.map(|c| (r.month, c)))
        .collect();
    if defined.len() < 4 {
        return None;
    }

    let window = (defined.len() / 2).min(3);
    let early: f64 =
        defined[..window].iter().map(|(_, c)| c).sum::<f64>() / window as f64;
    let late: f64 = defined[defined.len() - window..]
        .iter()
        .map(|(_, c)| c)
        .sum::<f64>()
        / window as f64;

    if early > 0.0 && late > early * CAC_RISE_FACTOR {
        Some(Recommendation {
            title: "Investigate rising acquisition cost".to_string(),
            details: format!(
                "Average CAC rose from {} in the early months to {} in the latest ones. Marketing efficiency is deteriorating; re-evaluate channel mix before scaling spend.",
                format_currency(early),
                format_currency(late),
            ),
        })
    } else {
        None
    }
}

fn consecutive_losses(annual: &AnnualSummary) -> Option<Recommendation> {
    let has_consecutive = annual
        .loss_months
        .windows(2)
        .any(|pair| pair[0] + 1 == pair[1]);
    if !has_consecutive {
        return None;
    }

    let names: Vec<&str> = annual
        .loss_months
        .iter()
        .map(|m| month_name(*m).unwrap_or("unknown"))
        .collect();

    Some(Recommendation {
        title: "Stop consecutive operating losses".to_string(),
        details: format!(
            "Operating income was negative in {} ({} month(s) total). Back-to-back losses point at a structural cost problem rather than a one-off.",
            names.join(", "),
            annual.loss_months.len(),
        ),
    })
}

fn opex_concentration(annual: &AnnualSummary) -> Option<Recommendation> {
    if annual.total_opex <= 0.0 {
        return None;
    }

    let (category, amount) = annual
        .opex_by_category
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))?;
    let share = amount / annual.total_opex;

    if share > OPEX_CONCENTRATION {
        Some(Recommendation {
            title: format!("Reduce dependence on '{}' spend", category),
            details: format!(
                "'{}' accounts for {} of total operating expenses ({} of {}). A single category dominating the cost base limits flexibility.",
                category,
                format_pct(Some(share)),
                format_currency(*amount),
                format_currency(annual.total_opex),
            ),
        })
    } else {
        None
    }
}
