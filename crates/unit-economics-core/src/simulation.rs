use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::health::{classify_with, Health, HealthThresholds, HealthVerdict};
use crate::inputs::FinancialInputs;
use crate::metrics::{compute, Metrics};
use crate::recommendations::{generate, Recommendation};
use crate::types::*;
use crate::UnitEconomicsResult;

/// Identifies the formula and threshold set behind a stored result.
pub const CALCULATION_VERSION: &str = "1.0.0";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The presented assessment for one submission. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub unit_margin: Money,
    pub unit_margin_pct: Rate,
    pub monthly_revenue: Money,
    pub monthly_profit: Money,
    pub ltv: Money,
    pub cac: Money,
    pub cac_ltv_ratio: Projection,
    pub cac_payback_months: Projection,
    pub break_even_units: Projection,
    pub break_even_months: Projection,
    pub profitability_health: Health,
    pub ltv_cac_health: Health,
    pub overall_health: Health,
    pub recommendations: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculation_notes: Option<String>,
    pub calculation_version: String,
}

impl SimulationResult {
    pub fn verdict(&self) -> HealthVerdict {
        HealthVerdict {
            profitability: self.profitability_health,
            ltv_cac: self.ltv_cac_health,
            overall: self.overall_health,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Assess the inputs with the default thresholds.
pub fn simulate(input: &FinancialInputs) -> UnitEconomicsResult<SimulationResult> {
    simulate_with(input, &HealthThresholds::default())
}

/// Assess the inputs against a caller-supplied threshold set.
///
/// Pure and deterministic: identical arguments give identical results.
pub fn simulate_with(
    input: &FinancialInputs,
    thresholds: &HealthThresholds,
) -> UnitEconomicsResult<SimulationResult> {
    input.validate()?;
    thresholds.validate()?;

    let metrics = compute(input);
    let verdict = classify_with(&metrics, thresholds);
    let recommendations = generate(&metrics, &verdict);

    Ok(present(
        &metrics,
        verdict,
        recommendations,
        input.calculation_notes.clone(),
        calculation_version(thresholds),
    ))
}

/// `simulate_with` wrapped in the standard computation envelope.
pub fn run_simulation(
    input: &FinancialInputs,
    thresholds: &HealthThresholds,
) -> UnitEconomicsResult<ComputationOutput<SimulationResult>> {
    let start = Instant::now();
    let result = simulate_with(input, thresholds)?;
    let warnings = collect_warnings(input, thresholds, &result);

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "unit_margin": "average_price - cost_per_unit",
        "monthly_revenue": "average_price * monthly_new_customers (new cohort only)",
        "monthly_profit": "monthly_revenue - cost_per_unit * monthly_new_customers - fixed_costs",
        "ltv": "unit_margin * average_customer_lifetime (one unit per customer per month)",
        "cac_ltv_ratio": "cac / ltv, unreachable when ltv <= 0",
        "break_even_units": "fixed_costs / unit_margin, unreachable when unit_margin <= 0",
        "break_even_months": "break_even_units / monthly_new_customers",
        "overall_health": "worst of profitability and ltv_cac",
        "thresholds": thresholds,
    });

    Ok(with_metadata(
        "Unit economics, break-even projection and viability health classification",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

pub fn calculation_version(thresholds: &HealthThresholds) -> String {
    if thresholds.is_default() {
        CALCULATION_VERSION.to_string()
    } else {
        format!("{CALCULATION_VERSION}+custom")
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Round once, at the presentation boundary.
fn present(
    m: &Metrics,
    verdict: HealthVerdict,
    recommendations: Vec<Recommendation>,
    calculation_notes: Option<String>,
    calculation_version: String,
) -> SimulationResult {
    SimulationResult {
        unit_margin: round(m.unit_margin, MONEY_DP),
        unit_margin_pct: round_ratio(m.unit_margin_pct),
        monthly_revenue: round(m.monthly_revenue, MONEY_DP),
        monthly_profit: round(m.monthly_profit, MONEY_DP),
        ltv: round(m.ltv, MONEY_DP),
        cac: round(m.cac, MONEY_DP),
        cac_ltv_ratio: m.cac_ltv_ratio.round_ratio(),
        cac_payback_months: m.cac_payback_months.round_dp(MONEY_DP),
        break_even_units: m.break_even_units.round_dp(MONEY_DP),
        break_even_months: m.break_even_months.round_dp(MONEY_DP),
        profitability_health: verdict.profitability,
        ltv_cac_health: verdict.ltv_cac,
        overall_health: verdict.overall,
        recommendations,
        calculation_notes,
        calculation_version,
    }
}

fn collect_warnings(
    input: &FinancialInputs,
    thresholds: &HealthThresholds,
    result: &SimulationResult,
) -> Vec<String> {
    let mut warnings = Vec::new();
    if result.break_even_units.is_unreachable() {
        warnings.push(
            "Unit margin is zero or negative; break-even is unreachable at current pricing."
                .to_string(),
        );
    } else if input.monthly_new_customers.is_zero() {
        warnings.push(
            "monthly_new_customers is zero; break-even months are unreachable.".to_string(),
        );
    }
    if result.cac_ltv_ratio.is_unreachable() {
        warnings.push("LTV is zero or negative; CAC/LTV ratio is unreachable.".to_string());
    }
    if !thresholds.is_default() {
        warnings.push(format!(
            "Custom health thresholds in use (calculation_version {}).",
            result.calculation_version
        ));
    }
    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnitEconomicsError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_demo_presented_values() {
        let r = simulate(&FinancialInputs::demo()).unwrap();

        assert_eq!(r.unit_margin, dec!(70));
        assert_eq!(r.unit_margin_pct, dec!(0.7));
        assert_eq!(r.monthly_revenue, dec!(10000));
        assert_eq!(r.ltv, dec!(1680));
        assert_eq!(r.cac, dec!(50));
        assert_eq!(r.cac_ltv_ratio, Projection::Finite(dec!(0.0298)));
        assert_eq!(r.cac_payback_months, Projection::Finite(dec!(0.71)));
        assert_eq!(r.break_even_units, Projection::Finite(dec!(28.57)));
        assert_eq!(r.break_even_months, Projection::Finite(dec!(0.29)));
        assert_eq!(r.overall_health, Health::Good);
        assert_eq!(r.calculation_version, CALCULATION_VERSION);
    }

    #[test]
    fn test_small_ratio_keeps_significant_digits() {
        let input = FinancialInputs {
            customer_acquisition_cost: dec!(0.001),
            ..FinancialInputs::demo()
        };
        let r = simulate(&input).unwrap();
        // 0.001 / 1680
        assert_eq!(r.cac_ltv_ratio, Projection::Finite(dec!(0.00000060)));
        assert_eq!(r.ltv_cac_health, Health::Good);
    }

    #[test]
    fn test_notes_pass_through() {
        let mut input = FinancialInputs::demo();
        input.calculation_notes = Some("Q3 pricing draft".into());
        let r = simulate(&input).unwrap();
        assert_eq!(r.calculation_notes.as_deref(), Some("Q3 pricing draft"));
    }

    #[test]
    fn test_invalid_input_no_partial_result() {
        let mut input = FinancialInputs::demo();
        input.customer_acquisition_cost = dec!(-10);
        let err = simulate(&input).unwrap_err();
        assert_eq!(
            err,
            UnitEconomicsError::InvalidInput {
                field: "customer_acquisition_cost".into(),
                reason: "must be zero or greater (got -10)".into(),
            }
        );
    }

    #[test]
    fn test_custom_thresholds_version() {
        let thresholds = HealthThresholds {
            max_break_even_months: dec!(3),
            ..HealthThresholds::default()
        };
        let r = simulate_with(&FinancialInputs::demo(), &thresholds).unwrap();
        assert_eq!(r.calculation_version, "1.0.0+custom");
    }

    #[test]
    fn test_envelope_warnings() {
        let mut input = FinancialInputs::demo();
        input.monthly_new_customers = Decimal::ZERO;
        let out = run_simulation(&input, &HealthThresholds::default()).unwrap();

        assert!(out.warnings.iter().any(|w| w.contains("monthly_new_customers")));
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
        assert!(out.methodology.contains("break-even"));
        assert!(out.assumptions.get("thresholds").is_some());
    }

    #[test]
    fn test_envelope_clean_for_demo() {
        let out = run_simulation(&FinancialInputs::demo(), &HealthThresholds::default()).unwrap();
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_verdict_roundtrip() {
        let r = simulate(&FinancialInputs::demo()).unwrap();
        let v = r.verdict();
        assert_eq!(v.profitability, r.profitability_health);
        assert_eq!(v.overall, Health::Good);
    }
}
