use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use unit_economics_core::health::{self, ThresholdBand};
use unit_economics_core::inputs::MAX_INPUT_MAGNITUDE;
use unit_economics_core::metrics;
use unit_economics_core::recommendations::{self, RecommendationStatus};
use unit_economics_core::{
    simulate, simulate_with, FinancialInputs, Health, HealthThresholds, Projection,
    UnitEconomicsError,
};

// ===========================================================================
// Fixtures
// ===========================================================================

fn unviable_pricing() -> FinancialInputs {
    FinancialInputs {
        average_price: dec!(20),
        cost_per_unit: dec!(25),
        ..FinancialInputs::demo()
    }
}

fn zero_acquisition() -> FinancialInputs {
    FinancialInputs {
        monthly_new_customers: Decimal::ZERO,
        ..FinancialInputs::demo()
    }
}

/// A spread of inputs covering each health combination.
fn input_grid() -> Vec<FinancialInputs> {
    let mut grid = Vec::new();
    for price in [dec!(0), dec!(25), dec!(30), dec!(45), dec!(100), dec!(250)] {
        for cac in [dec!(0), dec!(50), dec!(600), dec!(5000)] {
            for customers in [dec!(0), dec!(10), dec!(28), dec!(100)] {
                for lifetime in [dec!(0), dec!(3), dec!(24)] {
                    grid.push(FinancialInputs {
                        average_price: price,
                        customer_acquisition_cost: cac,
                        monthly_new_customers: customers,
                        average_customer_lifetime: lifetime,
                        ..FinancialInputs::demo()
                    });
                }
            }
        }
    }
    grid
}

// ===========================================================================
// Concrete scenarios
// ===========================================================================

#[test]
fn test_demo_scenario() {
    let r = simulate(&FinancialInputs::demo()).unwrap();

    assert_eq!(r.unit_margin, dec!(70));
    assert_eq!(r.monthly_revenue, dec!(10000));
    assert_eq!(r.monthly_profit, dec!(5000));
    assert_eq!(r.ltv, dec!(1680));
    assert_eq!(r.cac, dec!(50));
    assert_eq!(r.cac_ltv_ratio, Projection::Finite(dec!(0.0298)));
    assert_eq!(r.break_even_units, Projection::Finite(dec!(28.57)));
    assert_eq!(r.break_even_months, Projection::Finite(dec!(0.29)));
    assert_eq!(r.profitability_health, Health::Good);
    assert_eq!(r.ltv_cac_health, Health::Good);
    assert_eq!(r.overall_health, Health::Good);
}

#[test]
fn test_unviable_pricing_scenario() {
    let r = simulate(&unviable_pricing()).unwrap();

    assert_eq!(r.unit_margin, dec!(-5));
    assert_eq!(r.break_even_units, Projection::Unreachable);
    assert_eq!(r.break_even_months, Projection::Unreachable);
    assert_eq!(r.profitability_health, Health::Poor);
    assert_eq!(r.overall_health, Health::Poor);
    assert_eq!(r.recommendations[0].status, RecommendationStatus::Critical);
}

#[test]
fn test_zero_acquisition_scenario() {
    let r = simulate(&zero_acquisition()).unwrap();

    assert_eq!(r.monthly_revenue, Decimal::ZERO);
    assert_eq!(r.break_even_units, Projection::Finite(dec!(28.57)));
    assert_eq!(r.break_even_months, Projection::Unreachable);
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_determinism() {
    for input in input_grid() {
        let a = simulate(&input).unwrap();
        let b = simulate(&input).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}

#[test]
fn test_margin_formula_holds() {
    for input in input_grid() {
        let m = metrics::compute(&input);
        assert_eq!(m.unit_margin, input.average_price - input.cost_per_unit);
    }
}

#[test]
fn test_break_even_unreachable_without_margin() {
    for input in input_grid() {
        let m = metrics::compute(&input);
        if m.unit_margin <= Decimal::ZERO {
            assert!(m.break_even_units.is_unreachable());
            assert!(m.break_even_months.is_unreachable());
        }
    }
}

#[test]
fn test_zero_ltv_is_poor() {
    for input in input_grid() {
        let m = metrics::compute(&input);
        if m.ltv.is_zero() {
            assert!(m.cac_ltv_ratio.is_unreachable());
            assert_eq!(health::classify(&m).ltv_cac, Health::Poor);
        }
    }
}

#[test]
fn test_poor_dimension_dominates() {
    for input in input_grid() {
        let r = simulate(&input).unwrap();
        if r.profitability_health == Health::Poor || r.ltv_cac_health == Health::Poor {
            assert_eq!(r.overall_health, Health::Poor);
        }
        if r.profitability_health == Health::Good && r.ltv_cac_health == Health::Good {
            assert_eq!(r.overall_health, Health::Good);
        }
    }
}

#[test]
fn test_recommendations_non_empty_and_ordered() {
    for input in input_grid() {
        let r = simulate(&input).unwrap();
        assert!(!r.recommendations.is_empty());
        assert!(r
            .recommendations
            .windows(2)
            .all(|w| w[0].status <= w[1].status));
    }
}

#[test]
fn test_table_order_kept_within_status() {
    let m = metrics::compute(&unviable_pricing());
    let v = health::classify(&m);
    let recs = recommendations::generate(&m, &v);

    let expected: Vec<&str> = recommendations::RULES
        .iter()
        .filter(|rule| rule.applies(&m, &v))
        .map(|rule| rule.title)
        .collect();
    let actual: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
    // all three are critical, so table order is the output order
    assert_eq!(actual, expected);
}

// ===========================================================================
// Validation and thresholds
// ===========================================================================

#[test]
fn test_negative_field_rejected() {
    let input = FinancialInputs {
        monthly_new_customers: dec!(-1),
        ..FinancialInputs::demo()
    };
    match simulate(&input).unwrap_err() {
        UnitEconomicsError::InvalidInput { field, .. } => {
            assert_eq!(field, "monthly_new_customers");
        }
    }
}

#[test]
fn test_stricter_bands_downgrade() {
    let thresholds = HealthThresholds {
        ltv_cac_bands: vec![
            ThresholdBand {
                upper: dec!(0.01),
                health: Health::Good,
            },
            ThresholdBand {
                upper: dec!(0.05),
                health: Health::Fair,
            },
        ],
        ..HealthThresholds::default()
    };
    let r = simulate_with(&FinancialInputs::demo(), &thresholds).unwrap();

    assert_eq!(r.ltv_cac_health, Health::Fair);
    assert_eq!(r.overall_health, Health::Fair);
    assert_eq!(r.calculation_version, "1.0.0+custom");
}

#[test]
fn test_thresholds_from_json() {
    let json = serde_json::json!({
        "max_break_even_months": "12",
        "loss_tolerance": "0.05",
        "ltv_cac_bands": [
            { "upper": "0.25", "health": "good" },
            { "upper": "0.8", "health": "fair" }
        ]
    });
    let thresholds: HealthThresholds = serde_json::from_value(json).unwrap();
    assert_eq!(thresholds.ltv_cac_bands[1].health, Health::Fair);
    assert!(thresholds.validate().is_ok());
}

#[test]
fn test_result_json_shape() {
    let r = simulate(&unviable_pricing()).unwrap();
    let json = serde_json::to_value(&r).unwrap();

    assert_eq!(json["break_even_units"], serde_json::json!("unreachable"));
    assert_eq!(json["overall_health"], serde_json::json!("poor"));
    assert_eq!(json["recommendations"][0]["type"], serde_json::json!("viability"));
    assert_eq!(json["recommendations"][0]["status"], serde_json::json!("critical"));
    assert_eq!(json["calculation_version"], serde_json::json!("1.0.0"));
    assert!(json.get("calculation_notes").is_none());
}

// ===========================================================================
// Extreme magnitudes
// ===========================================================================

fn rejected_field(input: &FinancialInputs) -> String {
    match simulate(input).unwrap_err() {
        UnitEconomicsError::InvalidInput { field, .. } => field,
    }
}

#[test]
fn test_oversized_inputs_rejected() {
    let input = FinancialInputs {
        average_price: Decimal::MAX,
        monthly_new_customers: dec!(2),
        ..FinancialInputs::demo()
    };
    assert_eq!(rejected_field(&input), "average_price");

    let input = FinancialInputs {
        fixed_costs: dec!(1e14),
        ..FinancialInputs::demo()
    };
    assert_eq!(rejected_field(&input), "fixed_costs");
}

#[test]
fn test_inputs_at_bound_accepted() {
    let input = FinancialInputs {
        average_price: MAX_INPUT_MAGNITUDE,
        cost_per_unit: MAX_INPUT_MAGNITUDE,
        fixed_costs: MAX_INPUT_MAGNITUDE,
        customer_acquisition_cost: MAX_INPUT_MAGNITUDE,
        monthly_new_customers: MAX_INPUT_MAGNITUDE,
        average_customer_lifetime: MAX_INPUT_MAGNITUDE,
        calculation_notes: None,
    };
    let r = simulate(&input).unwrap();
    assert_eq!(r.unit_margin, Decimal::ZERO);
    assert_eq!(r.monthly_revenue, dec!(1e24));
    assert_eq!(r.overall_health, Health::Poor);
}

#[test]
fn test_negligible_acquisition_cost() {
    let input = FinancialInputs {
        average_price: dec!(1_000_000_000_000),
        customer_acquisition_cost: dec!(1e-25),
        ..FinancialInputs::demo()
    };
    let r = simulate(&input).unwrap();
    assert_eq!(r.ltv_cac_health, Health::Good);
    assert!(!r.recommendations.is_empty());
    assert!(r
        .recommendations
        .iter()
        .any(|rec| rec.message.contains("far more than their acquisition cost")));
}

#[test]
fn test_negligible_margin_never_breaks_even() {
    let input = FinancialInputs {
        average_price: dec!(1.0000000000000000000000001),
        cost_per_unit: dec!(1),
        fixed_costs: dec!(1_000_000_000_000),
        ..FinancialInputs::demo()
    };
    let r = simulate(&input).unwrap();
    assert_eq!(r.break_even_units, Projection::Unreachable);
    assert_eq!(r.break_even_months, Projection::Unreachable);
    assert_eq!(r.profitability_health, Health::Poor);
}
