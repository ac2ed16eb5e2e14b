pub mod file;
pub mod stdin;

use log::{debug, info};
use unit_economics_core::{FinancialInputs, HealthThresholds};

/// Resolve business inputs: `--input` file, then `--demo`, then piped stdin.
///
/// Returns `None` when no source applies so the caller can fall back to flags.
pub fn resolve_inputs(
    path: Option<&str>,
    demo: bool,
) -> Result<Option<FinancialInputs>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        info!("reading inputs from {path}");
        return Ok(Some(file::read_structured(path)?));
    }
    if demo {
        debug!("using demo inputs");
        return Ok(Some(FinancialInputs::demo()));
    }
    if let Some(data) = stdin::read_stdin()? {
        debug!("reading inputs from stdin");
        return Ok(Some(serde_json::from_value(data)?));
    }
    Ok(None)
}

/// Load a threshold set, or the defaults when no path is given.
pub fn resolve_thresholds(
    path: Option<&str>,
) -> Result<HealthThresholds, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let thresholds: HealthThresholds = file::read_structured(path)?;
            thresholds.validate()?;
            info!("loaded health thresholds from {path}");
            Ok(thresholds)
        }
        None => Ok(HealthThresholds::default()),
    }
}
