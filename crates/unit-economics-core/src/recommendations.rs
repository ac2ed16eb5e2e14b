use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::health::{Health, HealthVerdict};
use crate::metrics::Metrics;
use crate::types::{round, Months, Projection, MONEY_DP};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Viability,
    Pricing,
    Costs,
    Acquisition,
    Retention,
}

/// Severity of a recommendation. Ordering runs most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    Critical,
    Warning,
    Positive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub message: String,
    pub status: RecommendationStatus,
}

/// One row of the rule table: when `applies` holds, emit the template.
pub struct Rule {
    pub id: &'static str,
    pub kind: RecommendationKind,
    pub status: RecommendationStatus,
    pub title: &'static str,
    applies: fn(&Metrics, &HealthVerdict) -> bool,
    message: fn(&Metrics, &HealthVerdict) -> String,
}

impl Rule {
    pub fn applies(&self, metrics: &Metrics, verdict: &HealthVerdict) -> bool {
        (self.applies)(metrics, verdict)
    }

    fn render(&self, metrics: &Metrics, verdict: &HealthVerdict) -> Recommendation {
        Recommendation {
            kind: self.kind,
            title: self.title.to_string(),
            message: (self.message)(metrics, verdict),
            status: self.status,
        }
    }
}

/// Customer lifetimes shorter than this draw a retention warning unless
/// acquisition economics are already healthy.
pub const SHORT_LIFETIME_MONTHS: Months = dec!(12);

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// Declaration order is the tie-break within a status.
pub static RULES: &[Rule] = &[
    Rule {
        id: "not_viable",
        kind: RecommendationKind::Viability,
        status: RecommendationStatus::Critical,
        title: "Business model is not yet viable",
        applies: |_, v| v.overall == Health::Poor,
        message: |_, v| {
            format!(
                "Profitability is {} and acquisition efficiency is {}. \
                 Fix the weakest dimension before investing in growth.",
                v.profitability, v.ltv_cac
            )
        },
    },
    Rule {
        id: "negative_unit_margin",
        kind: RecommendationKind::Pricing,
        status: RecommendationStatus::Critical,
        title: "Price does not cover unit cost",
        applies: |m, _| m.unit_margin <= Decimal::ZERO,
        message: |m, _| {
            format!(
                "Each sale contributes {} after variable costs, so the business can never \
                 break even at current pricing. Raise the price or reduce the cost per unit.",
                money(m.unit_margin)
            )
        },
    },
    Rule {
        id: "fixed_costs_uncovered",
        kind: RecommendationKind::Costs,
        status: RecommendationStatus::Critical,
        title: "Fixed costs outpace contribution",
        applies: |m, v| v.profitability == Health::Poor && m.unit_margin > Decimal::ZERO,
        message: |m, _| {
            format!(
                "The business loses {} per month. Covering fixed costs of {} takes {} sales \
                 per month; grow volume or cut overheads.",
                money(-m.monthly_profit),
                money(m.fixed_costs),
                projection(m.break_even_units)
            )
        },
    },
    Rule {
        id: "cac_exceeds_ltv",
        kind: RecommendationKind::Acquisition,
        status: RecommendationStatus::Critical,
        title: "Customers cost more than they are worth",
        applies: |_, v| v.ltv_cac == Health::Poor,
        message: |m, _| {
            if m.ltv <= Decimal::ZERO {
                format!(
                    "Customers generate no lifetime margin, so an acquisition cost of {} is \
                     never recovered.",
                    money(m.cac)
                )
            } else {
                format!(
                    "Acquiring a customer costs {} but returns only {} in lifetime margin. \
                     Lower acquisition cost or keep customers longer.",
                    money(m.cac),
                    money(m.ltv)
                )
            }
        },
    },
    Rule {
        id: "no_new_customers",
        kind: RecommendationKind::Acquisition,
        status: RecommendationStatus::Warning,
        title: "No customer acquisition planned",
        applies: |m, _| m.monthly_new_customers.is_zero(),
        message: |_, _| {
            "With no new customers each month there is no revenue and no break-even \
             timeline. Plan at least one acquisition channel."
                .to_string()
        },
    },
    Rule {
        id: "near_break_even",
        kind: RecommendationKind::Pricing,
        status: RecommendationStatus::Warning,
        title: "Close to break-even",
        applies: |_, v| v.profitability == Health::Fair,
        message: |m, _| {
            format!(
                "Monthly profit is {}. A modest price increase or fixed-cost reduction would \
                 move the business into clear profit.",
                money(m.monthly_profit)
            )
        },
    },
    Rule {
        id: "acquisition_efficiency",
        kind: RecommendationKind::Acquisition,
        status: RecommendationStatus::Warning,
        title: "Improve acquisition efficiency",
        applies: |_, v| v.ltv_cac == Health::Fair,
        message: |m, _| {
            format!(
                "Lifetime value is {} against an acquisition cost of {}. Aim for LTV of at \
                 least 3x CAC.",
                money(m.ltv),
                money(m.cac)
            )
        },
    },
    Rule {
        id: "short_customer_lifetime",
        kind: RecommendationKind::Retention,
        status: RecommendationStatus::Warning,
        title: "Customers churn quickly",
        applies: |m, v| {
            m.customer_lifetime_months < SHORT_LIFETIME_MONTHS && v.ltv_cac != Health::Good
        },
        message: |m, _| {
            format!(
                "Customers stay {} months on average. Every extra month of retention adds {} \
                 of lifetime value.",
                money(m.customer_lifetime_months),
                money(m.unit_margin)
            )
        },
    },
    Rule {
        id: "viable_with_caveats",
        kind: RecommendationKind::Viability,
        status: RecommendationStatus::Warning,
        title: "Viable with caveats",
        applies: |_, v| v.overall == Health::Fair,
        message: |_, v| {
            format!(
                "Profitability is {} and acquisition efficiency is {}. The model can work, \
                 but address the fair dimension before scaling.",
                v.profitability, v.ltv_cac
            )
        },
    },
    Rule {
        id: "healthy_profitability",
        kind: RecommendationKind::Pricing,
        status: RecommendationStatus::Positive,
        title: "Healthy unit economics",
        applies: |_, v| v.profitability == Health::Good,
        message: |m, _| {
            format!(
                "The business earns {} per month and covers fixed costs in {} months.",
                money(m.monthly_profit),
                projection(m.break_even_months)
            )
        },
    },
    Rule {
        id: "efficient_acquisition",
        kind: RecommendationKind::Acquisition,
        status: RecommendationStatus::Positive,
        title: "Efficient customer acquisition",
        applies: |_, v| v.ltv_cac == Health::Good,
        message: |m, _| {
            if m.cac.is_zero() {
                return "Customers cost nothing to acquire; lifetime value is pure margin."
                    .to_string();
            }
            match m.ltv.checked_div(m.cac) {
                Some(multiple) => format!(
                    "Each customer returns {}x their acquisition cost.",
                    money(multiple)
                ),
                None => "Each customer returns far more than their acquisition cost.".to_string(),
            }
        },
    },
    Rule {
        id: "viable",
        kind: RecommendationKind::Viability,
        status: RecommendationStatus::Positive,
        title: "Business model looks viable",
        applies: |_, v| v.overall == Health::Good,
        message: |_, _| {
            "Both profitability and acquisition economics are healthy. Keep monitoring \
             them as you scale."
                .to_string()
        },
    },
];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate every rule in table order, then order by status.
///
/// Never empty: exactly one of the viability rules matches any verdict.
pub fn generate(metrics: &Metrics, verdict: &HealthVerdict) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = RULES
        .iter()
        .filter(|rule| rule.applies(metrics, verdict))
        .map(|rule| rule.render(metrics, verdict))
        .collect();
    // sort_by_key is stable, so table order survives within a status
    recommendations.sort_by_key(|r| r.status);
    recommendations
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn money(value: Decimal) -> String {
    round(value, MONEY_DP).to_string()
}

fn projection(value: Projection) -> String {
    value.round_dp(MONEY_DP).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
