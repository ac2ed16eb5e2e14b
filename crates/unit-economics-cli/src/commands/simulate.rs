use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use unit_economics_core::{run_simulation, FinancialInputs, HealthThresholds};

use crate::input;

/// Arguments for a viability assessment
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Use the built-in demo business
    #[arg(long)]
    pub demo: bool,

    /// Path to JSON/YAML health thresholds (defaults apply otherwise)
    #[arg(long)]
    pub thresholds: Option<String>,

    /// Price per unit sold
    #[arg(long, alias = "price")]
    pub average_price: Option<Decimal>,

    /// Variable cost per unit
    #[arg(long, alias = "unit-cost")]
    pub cost_per_unit: Option<Decimal>,

    /// Monthly fixed costs
    #[arg(long)]
    pub fixed_costs: Option<Decimal>,

    /// Cost to acquire one customer
    #[arg(long, alias = "cac")]
    pub customer_acquisition_cost: Option<Decimal>,

    /// Expected new customers per month
    #[arg(long, alias = "customers")]
    pub monthly_new_customers: Option<Decimal>,

    /// Expected months a customer stays
    #[arg(long, alias = "lifetime")]
    pub average_customer_lifetime: Option<Decimal>,

    /// Free-form note carried through to the result
    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for printing thresholds
#[derive(Args)]
pub struct ThresholdsArgs {
    /// Validate and print this threshold file instead of the defaults
    #[arg(long)]
    pub file: Option<String>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut inputs = match input::resolve_inputs(args.input.as_deref(), args.demo)? {
        Some(inputs) => inputs,
        None => inputs_from_flags(&args)?,
    };
    if args.notes.is_some() {
        inputs.calculation_notes = args.notes.clone();
    }

    let thresholds = input::resolve_thresholds(args.thresholds.as_deref())?;
    let result = run_simulation(&inputs, &thresholds)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_thresholds(args: ThresholdsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let thresholds: HealthThresholds = input::resolve_thresholds(args.file.as_deref())?;
    Ok(serde_json::to_value(thresholds)?)
}

fn inputs_from_flags(args: &SimulateArgs) -> Result<FinancialInputs, Box<dyn std::error::Error>> {
    Ok(FinancialInputs {
        average_price: args
            .average_price
            .ok_or("--average-price is required (or provide --input / --demo)")?,
        cost_per_unit: args
            .cost_per_unit
            .ok_or("--cost-per-unit is required (or provide --input / --demo)")?,
        fixed_costs: args
            .fixed_costs
            .ok_or("--fixed-costs is required (or provide --input / --demo)")?,
        customer_acquisition_cost: args
            .customer_acquisition_cost
            .ok_or("--customer-acquisition-cost is required (or provide --input / --demo)")?,
        monthly_new_customers: args
            .monthly_new_customers
            .ok_or("--monthly-new-customers is required (or provide --input / --demo)")?,
        average_customer_lifetime: args
            .average_customer_lifetime
            .ok_or("--average-customer-lifetime is required (or provide --input / --demo)")?,
        calculation_notes: None,
    })
}
