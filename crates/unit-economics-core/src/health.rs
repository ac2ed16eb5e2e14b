use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::metrics::Metrics;
use crate::types::{Months, Multiple, Projection, Rate};
use crate::{UnitEconomicsError, UnitEconomicsResult};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Ordinal health category. Ordering runs worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Health {
    Poor,
    Fair,
    Good,
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Poor => write!(f, "poor"),
            Self::Fair => write!(f, "fair"),
            Self::Good => write!(f, "good"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthVerdict {
    pub profitability: Health,
    pub ltv_cac: Health,
    pub overall: Health,
}

/// One step of a threshold ladder: values strictly below `upper` earn `health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    pub upper: Multiple,
    pub health: Health,
}

/// Tunable cut-offs for the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthThresholds {
    /// Longest break-even horizon still rated good
    pub max_break_even_months: Months,
    /// Loss, as a share of monthly fixed costs, still rated fair
    pub loss_tolerance: Rate,
    /// CAC/LTV ladder, ascending by `upper`; anything past the last band is poor
    pub ltv_cac_bands: Vec<ThresholdBand>,
}

// ---------------------------------------------------------------------------
// Default thresholds
// ---------------------------------------------------------------------------

pub const DEFAULT_MAX_BREAK_EVEN_MONTHS: Months = dec!(6);
pub const DEFAULT_LOSS_TOLERANCE: Rate = dec!(0.10);

/// LTV above 3x CAC.
pub const HEALTHY_CAC_LTV_RATIO: Multiple = dec!(0.33);
/// LTV at least equal to CAC.
pub const MARGINAL_CAC_LTV_RATIO: Multiple = dec!(1.0);

impl Default for HealthThresholds {
    fn default() -> Self {
        HealthThresholds {
            max_break_even_months: DEFAULT_MAX_BREAK_EVEN_MONTHS,
            loss_tolerance: DEFAULT_LOSS_TOLERANCE,
            ltv_cac_bands: vec![
                ThresholdBand {
                    upper: HEALTHY_CAC_LTV_RATIO,
                    health: Health::Good,
                },
                ThresholdBand {
                    upper: MARGINAL_CAC_LTV_RATIO,
                    health: Health::Fair,
                },
            ],
        }
    }
}

impl HealthThresholds {
    pub fn is_default(&self) -> bool {
        *self == HealthThresholds::default()
    }

    pub fn validate(&self) -> UnitEconomicsResult<()> {
        if self.max_break_even_months < Decimal::ZERO {
            return Err(UnitEconomicsError::invalid(
                "max_break_even_months",
                "must be zero or greater",
            ));
        }
        if self.loss_tolerance < Decimal::ZERO {
            return Err(UnitEconomicsError::invalid(
                "loss_tolerance",
                "must be zero or greater",
            ));
        }
        let ascending = self
            .ltv_cac_bands
            .windows(2)
            .all(|pair| pair[0].upper < pair[1].upper);
        if !ascending {
            return Err(UnitEconomicsError::invalid(
                "ltv_cac_bands",
                "bands must be strictly ascending by upper bound",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Classify with the default thresholds.
pub fn classify(metrics: &Metrics) -> HealthVerdict {
    classify_with(metrics, &HealthThresholds::default())
}

pub fn classify_with(metrics: &Metrics, thresholds: &HealthThresholds) -> HealthVerdict {
    let profitability = classify_profitability(metrics, thresholds);
    let ltv_cac = classify_ltv_cac(&metrics.cac_ltv_ratio, &thresholds.ltv_cac_bands);
    HealthVerdict {
        profitability,
        ltv_cac,
        overall: combine(profitability, ltv_cac),
    }
}

/// Worst dimension dominates.
pub fn combine(profitability: Health, ltv_cac: Health) -> Health {
    profitability.min(ltv_cac)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn classify_profitability(metrics: &Metrics, thresholds: &HealthThresholds) -> Health {
    if metrics.unit_margin <= Decimal::ZERO {
        return Health::Poor;
    }

    if metrics.monthly_profit > Decimal::ZERO {
        return match metrics.break_even_months {
            Projection::Finite(months) if months <= thresholds.max_break_even_months => {
                Health::Good
            }
            _ => Health::Fair,
        };
    }

    let loss = -metrics.monthly_profit;
    // A tolerance product beyond range covers any representable loss.
    let within_tolerance = metrics
        .fixed_costs
        .checked_mul(thresholds.loss_tolerance)
        .map_or(true, |limit| loss <= limit);
    if within_tolerance {
        Health::Fair
    } else {
        Health::Poor
    }
}

fn classify_ltv_cac(ratio: &Projection, bands: &[ThresholdBand]) -> Health {
    let ratio = match ratio {
        Projection::Finite(r) => *r,
        Projection::Unreachable => return Health::Poor,
    };
    bands
        .iter()
        .find(|band| ratio < band.upper)
        .map(|band| band.health)
        .unwrap_or(Health::Poor)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
