pub mod error;
pub mod health;
pub mod inputs;
pub mod metrics;
pub mod recommendations;
pub mod simulation;
pub mod types;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

pub use error::UnitEconomicsError;
pub use health::{Health, HealthThresholds, HealthVerdict};
pub use inputs::FinancialInputs;
pub use simulation::{run_simulation, simulate, simulate_with, SimulationResult};
pub use types::*;

/// Standard result type for all unit-economics operations
pub type UnitEconomicsResult<T> = Result<T, UnitEconomicsError>;
