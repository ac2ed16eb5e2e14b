use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Multiples and ratios (e.g., CAC / LTV)
pub type Multiple = Decimal;

/// Month counts, possibly fractional
pub type Months = Decimal;

/// Decimal places kept for money and unit counts in presented results.
pub const MONEY_DP: u32 = 2;

/// Decimal places kept for ratios and percentages in presented results.
pub const RATIO_DP: u32 = 4;

/// Significant digits kept for ratios too small for `RATIO_DP` to show.
pub const RATIO_SIG_DIGITS: u32 = 2;

/// A derived figure that may not exist for the given inputs.
///
/// Break-even horizons and ratios with a zero denominator, or a quotient
/// beyond the range of `Decimal`, are `Unreachable` rather than infinity or
/// NaN, so they can never leak into arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    Finite(Decimal),
    Unreachable,
}

impl Projection {
    /// `numerator / denominator` when the denominator is strictly positive
    /// and the quotient is representable.
    pub fn ratio(numerator: Decimal, denominator: Decimal) -> Self {
        if denominator <= Decimal::ZERO {
            return Projection::Unreachable;
        }
        numerator
            .checked_div(denominator)
            .map_or(Projection::Unreachable, Projection::Finite)
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            Projection::Finite(v) => Some(*v),
            Projection::Unreachable => None,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Projection::Unreachable)
    }

    /// Chain another division onto a finite value.
    pub fn per(self, denominator: Decimal) -> Self {
        match self {
            Projection::Finite(v) => Projection::ratio(v, denominator),
            Projection::Unreachable => Projection::Unreachable,
        }
    }

    pub fn round_dp(self, dp: u32) -> Self {
        match self {
            Projection::Finite(v) => Projection::Finite(round(v, dp)),
            Projection::Unreachable => Projection::Unreachable,
        }
    }

    pub fn round_ratio(self) -> Self {
        match self {
            Projection::Finite(v) => Projection::Finite(round_ratio(v)),
            Projection::Unreachable => Projection::Unreachable,
        }
    }
}

impl std::fmt::Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(v) => write!(f, "{v}"),
            Self::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// Presentation rounding, half away from zero.
pub fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Ratio rounding: `RATIO_DP` places, widened to `RATIO_SIG_DIGITS`
/// significant digits when the value is below 0.01.
pub fn round_ratio(value: Decimal) -> Decimal {
    if value.is_zero() || value.abs() >= dec!(0.01) {
        return round(value, RATIO_DP);
    }
    value
        .round_sf_with_strategy(RATIO_SIG_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .unwrap_or(value)
}

/// Division for quantities that stay finite by construction: a quotient
/// beyond range clamps to `Decimal::MAX` / `Decimal::MIN`.
pub fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() != denominator.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
