use clap::Args;
use log::info;
use rust_decimal::Decimal;
use serde_json::Value;

use unit_economics_core::sensitivity::{self, InputField, SensitivityInput};

use crate::input;

/// Arguments for a one-variable sensitivity sweep
#[derive(Args)]
pub struct SensitivityArgs {
    /// Variable to sweep in format name:min:max:step
    /// (e.g. "average_price:40:160:20")
    #[arg(long)]
    pub var: String,

    /// Path to JSON/YAML file with base case inputs
    #[arg(long)]
    pub input: Option<String>,

    /// Sweep around the built-in demo business
    #[arg(long)]
    pub demo: bool,

    /// Path to JSON/YAML health thresholds
    #[arg(long)]
    pub thresholds: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct SweepSpec {
    variable: InputField,
    min: Decimal,
    max: Decimal,
    step: Decimal,
}

fn parse_sweep_spec(spec: &str) -> Result<SweepSpec, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 4 {
        return Err(format!(
            "Sensitivity variable must be name:min:max:step, got '{}'",
            spec
        )
        .into());
    }
    Ok(SweepSpec {
        variable: parts[0].parse()?,
        min: parts[1].parse()?,
        max: parts[2].parse()?,
        step: parts[3].parse()?,
    })
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let spec = parse_sweep_spec(&args.var)?;
    let base_inputs = input::resolve_inputs(args.input.as_deref(), args.demo)?
        .ok_or("--input <file>, --demo or stdin required for base case inputs")?;
    let thresholds = input::resolve_thresholds(args.thresholds.as_deref())?;

    info!(
        "sweeping {} from {} to {} by {}",
        spec.variable.name(),
        spec.min,
        spec.max,
        spec.step
    );

    let sweep_input = SensitivityInput {
        base_inputs,
        variable: spec.variable,
        min: spec.min,
        max: spec.max,
        step: spec.step,
        thresholds,
    };
    let result = sensitivity::sweep(&sweep_input)?;
    Ok(serde_json::to_value(result)?)
}
