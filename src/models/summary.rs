//! Projection types produced by the engine.
//!
//! This module contains the read-only views the engine derives from its
//! state: the allocation validation result, the required-vs-actual rate
//! comparison, the full internal [`ProjectSummary`], the model's
//! [`RateModelSummary`], and the client-facing [`ClientQuote`].
//!
//! The quote deliberately hides the uplift mechanics: it carries a single
//! unlabeled day rate and never exposes the applied uplift percentage or the
//! uplift factors. The discount, by contrast, is disclosed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AllocationFactor, Task};
use crate::calculation::RoundingMode;

/// The result of checking whether a category's allocations sum to 100.
///
/// The check runs over every factor in the category, selected or not:
/// allocation totals describe the category's configuration, not what is
/// currently applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationValidation {
    /// True when the total is within 0.01 of 100.
    pub valid: bool,
    /// The sum of all allocations in the category.
    pub total: Decimal,
    /// How much allocation is left before reaching 100 (negative if over).
    pub remaining: Decimal,
}

/// Comparison of the actual project day rate against the required day rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateComparison {
    /// The minimum day rate needed to meet the financial targets.
    pub required_day_rate: Decimal,
    /// The effective day rate implied by the final project cost.
    pub actual_day_rate: Decimal,
    /// Difference between actual and required, as a percentage of required.
    pub diff_percent: Decimal,
    /// True when the actual day rate meets or exceeds the required one.
    pub is_sufficient: bool,
}

/// Snapshot of the rate model's inputs and derived rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateModelSummary {
    /// Annual salary budget target.
    pub salary_budget: Decimal,
    /// Annual growth/profit target.
    pub growth_budget: Decimal,
    /// Weeks worked per year.
    pub working_weeks: Decimal,
    /// Headcount sharing the budget.
    pub team_members: Decimal,
    /// Billable hours per member per week.
    pub hours_per_week: Decimal,
    /// The active rate rounding mode.
    pub rounding: RoundingMode,
    /// Total billable hours across the team per year.
    pub total_hours: Decimal,
    /// Total workdays across the team per year.
    pub total_workdays: Decimal,
    /// Required hourly rate after rounding.
    pub required_hourly_rate: Decimal,
    /// Required day rate after rounding.
    pub required_day_rate: Decimal,
    /// Day rate with the engine's applied uplift baked in.
    pub uplifted_day_rate: Decimal,
}

/// The full internal view of a priced project.
///
/// Unlike the client quote, this exposes everything: factor configurations,
/// both validations, the applied uplift, and the rate comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Client the project is being priced for.
    pub client_name: String,
    /// Person preparing the pricing.
    pub preparer_name: String,
    /// Tasks in insertion order, with cached costs.
    pub tasks: Vec<Task>,
    /// Sum of task day estimates.
    pub total_days: Decimal,
    /// Maximum uplift percentage cap.
    pub max_uplift: Decimal,
    /// Uplift factors in insertion order.
    pub uplift_factors: Vec<AllocationFactor>,
    /// Whether the uplift allocations sum to 100.
    pub uplift_validation: AllocationValidation,
    /// Maximum discount percentage cap.
    pub max_discount: Decimal,
    /// Discount factors in insertion order.
    pub discount_factors: Vec<AllocationFactor>,
    /// Whether the discount allocations sum to 100.
    pub discount_validation: AllocationValidation,
    /// Uplift percentage currently applied to the day rate.
    pub applied_uplift_percent: Decimal,
    /// Day rate with the applied uplift baked in.
    pub uplifted_day_rate: Decimal,
    /// Sum of task costs (uplift-inclusive).
    pub base_project_cost: Decimal,
    /// Discount percentage currently applied to the base cost.
    pub applied_discount_percent: Decimal,
    /// Discount taken off the base cost, as an amount.
    pub discount_amount: Decimal,
    /// Base cost less the discount.
    pub final_project_cost: Decimal,
    /// Effective day rate implied by the final cost.
    pub actual_day_rate: Decimal,
    /// Effective hourly rate implied by the final cost.
    pub actual_hourly_rate: Decimal,
    /// Required-vs-actual rate comparison.
    pub rate_comparison: RateComparison,
}

/// One priced task line on a client quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLine {
    /// Task name as shown to the client.
    pub name: String,
    /// Estimated effort in days.
    pub days: Decimal,
    /// Cost at the quoted day rate.
    pub cost: Decimal,
}

/// A project total converted into a display currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    /// Currency code.
    pub code: String,
    /// Display symbol.
    pub symbol: String,
    /// Human-readable currency name.
    pub display_name: String,
    /// The converted amount.
    pub amount: Decimal,
}

/// The client-facing projection of a priced project.
///
/// Carries one quoted `day_rate` with the uplift already baked in; the
/// uplift percentage and its factors are never present here. The discount
/// is disclosed as both a percentage and an amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientQuote {
    /// Client the quote is addressed to.
    pub client_name: String,
    /// Person who prepared the quote.
    pub prepared_by: String,
    /// The quoted day rate.
    pub day_rate: Decimal,
    /// Priced task lines in insertion order.
    pub lines: Vec<QuoteLine>,
    /// Sum of task day estimates.
    pub total_days: Decimal,
    /// Sum of task line costs before the discount.
    pub subtotal: Decimal,
    /// Discount percentage applied to the subtotal.
    pub discount_percent: Decimal,
    /// Discount as an amount in the base currency.
    pub discount_amount: Decimal,
    /// Final quoted total in the base currency.
    pub total: Decimal,
    /// The base currency code for all amounts above.
    pub base_currency: String,
    /// The final total converted into enabled non-base currencies.
    pub converted_totals: Vec<CurrencyAmount>,
}
