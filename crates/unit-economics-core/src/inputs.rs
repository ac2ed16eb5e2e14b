use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Months};
use crate::{UnitEconomicsError, UnitEconomicsResult};

/// Largest accepted value for any numeric input (one trillion). Products of
/// two inputs then stay far inside the range of `Decimal`.
pub const MAX_INPUT_MAGNITUDE: Decimal = dec!(1_000_000_000_000);

/// Business inputs submitted for one viability assessment.
///
/// Every numeric field must lie in `0..=MAX_INPUT_MAGNITUDE`. Negative *derived* figures
/// (margin, profit) are valid outcomes and are classified, not rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInputs {
    /// Price per unit sold
    pub average_price: Money,
    /// Variable cost per unit
    pub cost_per_unit: Money,
    /// Monthly fixed costs
    pub fixed_costs: Money,
    /// Cost to acquire one customer
    pub customer_acquisition_cost: Money,
    /// Expected new customers per month
    pub monthly_new_customers: Decimal,
    /// Expected months a customer stays
    pub average_customer_lifetime: Months,
    /// Free-form annotation, passed through to the result unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation_notes: Option<String>,
}

impl FinancialInputs {
    /// The sample business used for walkthroughs.
    pub fn demo() -> Self {
        FinancialInputs {
            average_price: dec!(100),
            cost_per_unit: dec!(30),
            fixed_costs: dec!(2000),
            customer_acquisition_cost: dec!(50),
            monthly_new_customers: dec!(100),
            average_customer_lifetime: dec!(24),
            calculation_notes: None,
        }
    }

    /// Field names and values in declaration order.
    pub fn numeric_fields(&self) -> [(&'static str, Decimal); 6] {
        [
            ("average_price", self.average_price),
            ("cost_per_unit", self.cost_per_unit),
            ("fixed_costs", self.fixed_costs),
            ("customer_acquisition_cost", self.customer_acquisition_cost),
            ("monthly_new_customers", self.monthly_new_customers),
            ("average_customer_lifetime", self.average_customer_lifetime),
        ]
    }

    /// Reject the first negative or out-of-range field.
    pub fn validate(&self) -> UnitEconomicsResult<()> {
        for (field, value) in self.numeric_fields() {
            if value < Decimal::ZERO {
                return Err(UnitEconomicsError::invalid(
                    field,
                    format!("must be zero or greater (got {value})"),
                ));
            }
            if value > MAX_INPUT_MAGNITUDE {
                return Err(UnitEconomicsError::invalid(
                    field,
                    format!("must not exceed {MAX_INPUT_MAGNITUDE} (got {value})"),
                ));
            }
        }
        Ok(())
    }
}
