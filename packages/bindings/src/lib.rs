use napi::Result as NapiResult;
use napi_derive::napi;

use unit_economics_core::sensitivity::SensitivityInput;
use unit_economics_core::{FinancialInputs, HealthThresholds};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate(input_json: String) -> NapiResult<String> {
    let input: FinancialInputs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = unit_economics_core::run_simulation(&input, &HealthThresholds::default())
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn simulate_with_thresholds(input_json: String, thresholds_json: String) -> NapiResult<String> {
    let input: FinancialInputs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let thresholds: HealthThresholds =
        serde_json::from_str(&thresholds_json).map_err(to_napi_error)?;
    let output =
        unit_economics_core::run_simulation(&input, &thresholds).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn default_thresholds() -> NapiResult<String> {
    serde_json::to_string(&HealthThresholds::default()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Sensitivity
// ---------------------------------------------------------------------------

#[napi]
pub fn sensitivity(input_json: String) -> NapiResult<String> {
    let input: SensitivityInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = unit_economics_core::sensitivity::sweep(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
