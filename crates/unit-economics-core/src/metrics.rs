use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inputs::FinancialInputs;
use crate::types::{saturating_div, Money, Months, Projection, Rate};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Unit economics derived from one set of inputs, at full precision.
///
/// Nothing here is rounded; presentation rounding happens once when the
/// final `SimulationResult` is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// average_price - cost_per_unit (may be negative)
    pub unit_margin: Money,
    /// unit_margin / average_price, zero when the price is zero
    pub unit_margin_pct: Rate,
    /// average_price * monthly_new_customers
    pub monthly_revenue: Money,
    /// revenue - variable costs - fixed costs
    pub monthly_profit: Money,
    /// unit_margin * average_customer_lifetime
    pub ltv: Money,
    pub cac: Money,
    /// cac / ltv, lower is better
    pub cac_ltv_ratio: Projection,
    /// Months of margin needed to recover one customer's CAC
    pub cac_payback_months: Projection,
    /// fixed_costs / unit_margin
    pub break_even_units: Projection,
    /// break_even_units / monthly_new_customers
    pub break_even_months: Projection,
    pub fixed_costs: Money,
    pub monthly_new_customers: Decimal,
    pub customer_lifetime_months: Months,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive unit economics from the raw inputs.
///
/// Total over any inputs: degenerate denominators (zero or negative margin,
/// zero customers, zero LTV) and out-of-range quotients yield
/// `Projection::Unreachable` instead of failing. Products saturate, which
/// cannot happen for inputs within `MAX_INPUT_MAGNITUDE`.
pub fn compute(input: &FinancialInputs) -> Metrics {
    let unit_margin = input.average_price.saturating_sub(input.cost_per_unit);
    let unit_margin_pct = if input.average_price.is_zero() {
        Decimal::ZERO
    } else {
        saturating_div(unit_margin, input.average_price)
    };

    // Revenue counts the month's new cohort only, one unit per customer.
    let monthly_revenue = input
        .average_price
        .saturating_mul(input.monthly_new_customers);
    let variable_costs = input
        .cost_per_unit
        .saturating_mul(input.monthly_new_customers);
    let monthly_profit = monthly_revenue
        .saturating_sub(variable_costs)
        .saturating_sub(input.fixed_costs);

    let ltv = unit_margin.saturating_mul(input.average_customer_lifetime);
    let cac = input.customer_acquisition_cost;

    let break_even_units = Projection::ratio(input.fixed_costs, unit_margin);
    let break_even_months = break_even_units.per(input.monthly_new_customers);

    Metrics {
        unit_margin,
        unit_margin_pct,
        monthly_revenue,
        monthly_profit,
        ltv,
        cac,
        cac_ltv_ratio: Projection::ratio(cac, ltv),
        cac_payback_months: Projection::ratio(cac, unit_margin),
        break_even_units,
        break_even_months,
        fixed_costs: input.fixed_costs,
        monthly_new_customers: input.monthly_new_customers,
        customer_lifetime_months: input.average_customer_lifetime,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
