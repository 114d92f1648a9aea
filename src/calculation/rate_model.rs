//! Business rate model.
//!
//! The rate model turns salary/growth targets and team capacity into the
//! hourly and day rates required to meet those targets. The day rate is an
//! independent division by total workdays, not the hourly rate times eight.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rounding::{RoundingMode, round_up_to_increment};
use crate::config::EngineDefaults;
use crate::models::RateModelSummary;

/// Workdays per working week.
const WORKDAYS_PER_WEEK: u32 = 5;

/// Derives required billing rates from budget and capacity inputs.
///
/// All derived fields are recomputed on every mutation and are never set
/// directly. Inputs are not range-validated: negative or zero values flow
/// through and may produce zero or negative rates, with zero denominators
/// yielding zero rather than faulting.
///
/// `uplifted_day_rate` is a cross-component field: it is pushed in by the
/// pricing engine via [`RateModel::apply_uplift`] during its recompute and
/// reflects the engine's most recently applied uplift.
///
/// # Example
///
/// ```
/// use pricing_engine::calculation::{RateModel, RateModelUpdate};
/// use rust_decimal::Decimal;
///
/// let mut model = RateModel::new();
/// model.update(RateModelUpdate {
///     salary_budget: Some(Decimal::from(100_000)),
///     growth_budget: Some(Decimal::from(20_000)),
///     ..Default::default()
/// });
/// // 48 weeks x 1 member x 35 h/week = 1680 hours; 240 workdays.
/// assert_eq!(model.total_hours(), Decimal::from(1680));
/// assert_eq!(model.required_day_rate(), Decimal::from(500));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RateModel {
    salary_budget: Decimal,
    growth_budget: Decimal,
    working_weeks: Decimal,
    team_members: Decimal,
    hours_per_week: Decimal,
    rounding: RoundingMode,

    total_hours: Decimal,
    total_workdays: Decimal,
    raw_hourly_rate: Decimal,
    raw_day_rate: Decimal,
    required_hourly_rate: Decimal,
    required_day_rate: Decimal,
    uplifted_day_rate: Decimal,
}

/// A partial update to the rate model's inputs.
///
/// Absent fields retain their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateModelUpdate {
    /// New annual salary budget target, if changing.
    #[serde(default)]
    pub salary_budget: Option<Decimal>,
    /// New annual growth/profit target, if changing.
    #[serde(default)]
    pub growth_budget: Option<Decimal>,
    /// New weeks worked per year, if changing.
    #[serde(default)]
    pub working_weeks: Option<Decimal>,
    /// New headcount, if changing.
    #[serde(default)]
    pub team_members: Option<Decimal>,
    /// New billable hours per member per week, if changing.
    #[serde(default)]
    pub hours_per_week: Option<Decimal>,
}

impl RateModel {
    /// Creates a model with the compiled-in capacity defaults: zero budgets,
    /// 48 working weeks, one team member, 35 hours per week, no rounding.
    pub fn new() -> Self {
        let mut model = Self {
            salary_budget: Decimal::ZERO,
            growth_budget: Decimal::ZERO,
            working_weeks: Decimal::from(48),
            team_members: Decimal::ONE,
            hours_per_week: Decimal::from(35),
            rounding: RoundingMode::None,
            total_hours: Decimal::ZERO,
            total_workdays: Decimal::ZERO,
            raw_hourly_rate: Decimal::ZERO,
            raw_day_rate: Decimal::ZERO,
            required_hourly_rate: Decimal::ZERO,
            required_day_rate: Decimal::ZERO,
            uplifted_day_rate: Decimal::ZERO,
        };
        model.recalculate();
        model
    }

    /// Creates a model seeded with configured capacity defaults.
    pub fn with_defaults(defaults: &EngineDefaults) -> Self {
        let mut model = Self::new();
        model.working_weeks = defaults.capacity.working_weeks;
        model.team_members = defaults.capacity.team_members;
        model.hours_per_week = defaults.capacity.hours_per_week;
        model.recalculate();
        model
    }

    /// Merges the provided fields over the current inputs and recomputes
    /// all derived rates.
    pub fn update(&mut self, update: RateModelUpdate) {
        self.salary_budget = update.salary_budget.unwrap_or(self.salary_budget);
        self.growth_budget = update.growth_budget.unwrap_or(self.growth_budget);
        self.working_weeks = update.working_weeks.unwrap_or(self.working_weeks);
        self.team_members = update.team_members.unwrap_or(self.team_members);
        self.hours_per_week = update.hours_per_week.unwrap_or(self.hours_per_week);
        self.recalculate();
    }

    /// Sets the uplifted day rate from an applied uplift percentage.
    ///
    /// Called by the pricing engine as part of its recompute; the model
    /// never derives this field from its own state.
    pub fn apply_uplift(&mut self, percent: Decimal) {
        self.uplifted_day_rate =
            self.required_day_rate * (Decimal::ONE + percent / Decimal::ONE_HUNDRED);
    }

    /// Changes the rounding mode and re-rounds the cached raw rates.
    ///
    /// Totals and raw rates are unaffected by rounding, so they are not
    /// re-derived here.
    pub fn set_rounding(&mut self, mode: RoundingMode) {
        self.rounding = mode;
        self.required_hourly_rate = round_up_to_increment(self.raw_hourly_rate, self.rounding);
        self.required_day_rate = round_up_to_increment(self.raw_day_rate, self.rounding);
    }

    fn recalculate(&mut self) {
        self.total_hours = self.team_members * self.hours_per_week * self.working_weeks;
        self.total_workdays =
            Decimal::from(WORKDAYS_PER_WEEK) * self.working_weeks * self.team_members;

        let target = self.salary_budget + self.growth_budget;

        self.raw_hourly_rate = if self.total_hours.is_zero() {
            Decimal::ZERO
        } else {
            target / self.total_hours
        };
        self.raw_day_rate = if self.total_workdays.is_zero() {
            Decimal::ZERO
        } else {
            target / self.total_workdays
        };

        self.required_hourly_rate = round_up_to_increment(self.raw_hourly_rate, self.rounding);
        self.required_day_rate = round_up_to_increment(self.raw_day_rate, self.rounding);
    }

    /// Annual salary budget target.
    pub fn salary_budget(&self) -> Decimal {
        self.salary_budget
    }

    /// Annual growth/profit target.
    pub fn growth_budget(&self) -> Decimal {
        self.growth_budget
    }

    /// Weeks worked per year.
    pub fn working_weeks(&self) -> Decimal {
        self.working_weeks
    }

    /// Headcount sharing the budget.
    pub fn team_members(&self) -> Decimal {
        self.team_members
    }

    /// Billable hours per member per week.
    pub fn hours_per_week(&self) -> Decimal {
        self.hours_per_week
    }

    /// The active rounding mode.
    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Total billable hours across the team per year.
    pub fn total_hours(&self) -> Decimal {
        self.total_hours
    }

    /// Total workdays across the team per year.
    pub fn total_workdays(&self) -> Decimal {
        self.total_workdays
    }

    /// Required hourly rate before rounding.
    pub fn raw_hourly_rate(&self) -> Decimal {
        self.raw_hourly_rate
    }

    /// Required day rate before rounding.
    pub fn raw_day_rate(&self) -> Decimal {
        self.raw_day_rate
    }

    /// Required hourly rate after rounding.
    pub fn required_hourly_rate(&self) -> Decimal {
        self.required_hourly_rate
    }

    /// Required day rate after rounding.
    pub fn required_day_rate(&self) -> Decimal {
        self.required_day_rate
    }

    /// Day rate with the engine's applied uplift baked in.
    pub fn uplifted_day_rate(&self) -> Decimal {
        self.uplifted_day_rate
    }

    /// Returns a serializable snapshot of inputs and derived rates.
    pub fn summary(&self) -> RateModelSummary {
        RateModelSummary {
            salary_budget: self.salary_budget,
            growth_budget: self.growth_budget,
            working_weeks: self.working_weeks,
            team_members: self.team_members,
            hours_per_week: self.hours_per_week,
            rounding: self.rounding,
            total_hours: self.total_hours,
            total_workdays: self.total_workdays,
            required_hourly_rate: self.required_hourly_rate,
            required_day_rate: self.required_day_rate,
            uplifted_day_rate: self.uplifted_day_rate,
        }
    }
}

impl Default for RateModel {
    fn default() -> Self {
        Self::new()
    }
}
