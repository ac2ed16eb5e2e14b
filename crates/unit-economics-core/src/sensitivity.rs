use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Instant;

use crate::health::{Health, HealthThresholds};
use crate::inputs::{FinancialInputs, MAX_INPUT_MAGNITUDE};
use crate::simulation::simulate_with;
use crate::types::*;
use crate::{UnitEconomicsError, UnitEconomicsResult};

/// Upper bound on evaluated points per sweep.
pub const MAX_SWEEP_POINTS: usize = 1_000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The input a sweep varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    AveragePrice,
    CostPerUnit,
    FixedCosts,
    CustomerAcquisitionCost,
    MonthlyNewCustomers,
    AverageCustomerLifetime,
}

impl InputField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AveragePrice => "average_price",
            Self::CostPerUnit => "cost_per_unit",
            Self::FixedCosts => "fixed_costs",
            Self::CustomerAcquisitionCost => "customer_acquisition_cost",
            Self::MonthlyNewCustomers => "monthly_new_customers",
            Self::AverageCustomerLifetime => "average_customer_lifetime",
        }
    }

    fn set(&self, input: &mut FinancialInputs, value: Decimal) {
        let slot = match self {
            Self::AveragePrice => &mut input.average_price,
            Self::CostPerUnit => &mut input.cost_per_unit,
            Self::FixedCosts => &mut input.fixed_costs,
            Self::CustomerAcquisitionCost => &mut input.customer_acquisition_cost,
            Self::MonthlyNewCustomers => &mut input.monthly_new_customers,
            Self::AverageCustomerLifetime => &mut input.average_customer_lifetime,
        };
        *slot = value;
    }
}

impl FromStr for InputField {
    type Err = UnitEconomicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim().to_lowercase().replace('-', "_").as_str() {
            "average_price" | "price" => Self::AveragePrice,
            "cost_per_unit" | "unit_cost" => Self::CostPerUnit,
            "fixed_costs" => Self::FixedCosts,
            "customer_acquisition_cost" | "cac" => Self::CustomerAcquisitionCost,
            "monthly_new_customers" | "customers" => Self::MonthlyNewCustomers,
            "average_customer_lifetime" | "lifetime" => Self::AverageCustomerLifetime,
            _ => {
                return Err(UnitEconomicsError::invalid(
                    "variable",
                    format!("unknown input field '{s}'"),
                ))
            }
        };
        Ok(field)
    }
}

/// Input for a one-variable what-if sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityInput {
    pub base_inputs: FinancialInputs,
    pub variable: InputField,
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
    #[serde(default)]
    pub thresholds: HealthThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityRow {
    pub value: Decimal,
    pub unit_margin: Money,
    pub monthly_profit: Money,
    pub cac_ltv_ratio: Projection,
    pub break_even_months: Projection,
    pub profitability_health: Health,
    pub ltv_cac_health: Health,
    pub overall_health: Health,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityOutput {
    pub variable: InputField,
    pub rows: Vec<SensitivityRow>,
    /// First swept value with an overall verdict of good
    pub first_good_value: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Re-run the full assessment across a range of one input.
pub fn sweep(input: &SensitivityInput) -> UnitEconomicsResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let values = generate_sweep_values(input)?;

    let mut rows = Vec::with_capacity(values.len());
    for value in values {
        let mut point = input.base_inputs.clone();
        input.variable.set(&mut point, value);
        let r = simulate_with(&point, &input.thresholds)?;
        rows.push(SensitivityRow {
            value,
            unit_margin: r.unit_margin,
            monthly_profit: r.monthly_profit,
            cac_ltv_ratio: r.cac_ltv_ratio,
            break_even_months: r.break_even_months,
            profitability_health: r.profitability_health,
            ltv_cac_health: r.ltv_cac_health,
            overall_health: r.overall_health,
        });
    }

    let first_good_value = rows
        .iter()
        .find(|row| row.overall_health == Health::Good)
        .map(|row| row.value);
    if first_good_value.is_none() {
        warnings.push(format!(
            "No value of {} in [{}, {}] reaches an overall verdict of good.",
            input.variable.name(),
            input.min,
            input.max
        ));
    }

    let output = SensitivityOutput {
        variable: input.variable,
        rows,
        first_good_value,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "One-variable sensitivity sweep of viability health",
        &serde_json::json!({
            "variable": input.variable.name(),
            "min": input.min.to_string(),
            "max": input.max.to_string(),
            "step": input.step.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Values from min to max by step, always ending on max.
fn generate_sweep_values(input: &SensitivityInput) -> UnitEconomicsResult<Vec<Decimal>> {
    let field = format!("variable:{}", input.variable.name());
    if input.step <= Decimal::ZERO {
        return Err(UnitEconomicsError::invalid(field, "Step must be positive"));
    }
    if input.min < Decimal::ZERO {
        return Err(UnitEconomicsError::invalid(field, "Min must be zero or greater"));
    }
    if input.min > input.max {
        return Err(UnitEconomicsError::invalid(field, "Min must be <= max"));
    }

    if input.max > MAX_INPUT_MAGNITUDE {
        return Err(UnitEconomicsError::invalid(
            field,
            format!("Max must not exceed {MAX_INPUT_MAGNITUDE}"),
        ));
    }

    // A span too large to represent is too many points as well.
    let within_limit = (input.max - input.min)
        .checked_div(input.step)
        .is_some_and(|span| span < Decimal::from(MAX_SWEEP_POINTS));
    if !within_limit {
        return Err(UnitEconomicsError::invalid(
            field,
            format!("Sweep exceeds {MAX_SWEEP_POINTS} points"),
        ));
    }

    let mut values = Vec::new();
    let mut next = Some(input.min);
    while let Some(current) = next.filter(|v| *v <= input.max) {
        values.push(current);
        next = current.checked_add(input.step);
    }
    if let Some(&last) = values.last() {
        if last < input.max {
            values.push(input.max);
        }
    }
    Ok(values)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
