use crate::ratios::MonthlyRatios;
use serde::{Deserialize, Serialize};

const GROWTH_THRESHOLD: f64 = 0.02;
const VOLATILITY_THRESHOLD: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevenueTrend {
    Growing,
    Declining,
    Flat,
    Volatile,
    /// Fewer than two comparable consecutive months.
    Insufficient,
}

impl RevenueTrend {
    pub fn describe(&self) -> &'static str {
        match self {
            RevenueTrend::Growing => "revenue is trending upward",
            RevenueTrend::Declining => "revenue is trending downward",
            RevenueTrend::Flat => "revenue is broadly flat",
            RevenueTrend::Volatile => "revenue swings sharply month to month",
            RevenueTrend::Insufficient => {
                "not enough consecutive months to establish a revenue trend"
            }
        }
    }
}

/// Classifies the revenue trend from the defined month-over-month growth
/// figures. Dispersion above 15 percentage points reads as volatile;
/// otherwise mean growth beyond +/-2% reads as growing or declining.
pub fn classify_revenue_trend(ratios: &[MonthlyRatios]) -> RevenueTrend {
    let growths: Vec<f64> = ratios.iter().filter_map(|r| r.mom_growth).collect();

    if growths.is_empty() {
        return RevenueTrend::Insufficient;
    }

    let mean = growths.iter().sum::<f64>() / growths.len() as f64;

    if growths.len() > 1 {
        let variance = growths
            .iter()
            .map(|g| (g - mean).powi(2))
            .sum::<f64>()
            / growths.len() as f64;
        if variance.sqrt() > VOLATILITY_THRESHOLD {
            return RevenueTrend::Volatile;
        }
    }

    if mean > GROWTH_THRESHOLD {
        RevenueTrend::Growing
    } else if mean < -GROWTH_THRESHOLD {
        RevenueTrend::Declining
    } else {
        RevenueTrend::Flat
    }
}
