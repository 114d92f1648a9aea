//! Project pricing engine.
//!
//! The engine owns one [`RateModel`] plus the project state: client and
//! preparer names, the task list, the uplift and discount factor lists,
//! their caps, and the currency table. Every mutation ends with the full
//! recompute cascade; derived fields are read-only projections in between.

use std::collections::BTreeMap;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::allocation::{applied_percent, validate_allocations};
use super::rate_model::{RateModel, RateModelUpdate};
use super::rounding::RoundingMode;
use crate::config::EngineDefaults;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllocationFactor, AllocationValidation, ClientQuote, Currency, CurrencyAmount, CurrencyTable,
    FactorCategory, FactorInput, ProjectSummary, QuoteLine, RateComparison, Task, TaskInput,
};
use crate::snapshot::{
    BusinessModelSection, CurrencyRateRecord, CurrencySection, FactorRecord, ProjectSection,
    ProjectSnapshot, SNAPSHOT_VERSION, TaskRecord, parse_snapshot,
};

/// Hours assumed per billed day when deriving the actual hourly rate.
const HOURS_PER_DAY: u32 = 8;

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Prices a project against a rate model.
///
/// The engine recomputes eagerly: every mutator runs the full ordered
/// cascade to completion before returning, so no partial state is ever
/// observable between operations. Unknown task, factor, and currency ids
/// are silent no-ops by contract, not errors.
///
/// # Example
///
/// ```
/// use pricing_engine::calculation::{PricingEngine, RateModel, RateModelUpdate};
/// use pricing_engine::models::{FactorCategory, FactorInput, TaskInput};
/// use rust_decimal::Decimal;
///
/// let mut model = RateModel::new();
/// model.update(RateModelUpdate {
///     salary_budget: Some(Decimal::from(100_000)),
///     growth_budget: Some(Decimal::from(20_000)),
///     ..Default::default()
/// });
///
/// let mut engine = PricingEngine::new(model);
/// engine.add_factor(FactorCategory::Uplift, FactorInput {
///     id: None,
///     name: "Specialist expertise".to_string(),
///     allocation: Decimal::from(100),
///     selected: None,
/// });
/// engine.add_task(TaskInput {
///     id: None,
///     name: "Build".to_string(),
///     days: Decimal::from(10),
/// });
///
/// // Day rate 500, uplifted by the default 20% cap to 600.
/// assert_eq!(engine.base_project_cost(), Decimal::from(6000));
/// ```
#[derive(Debug, Clone)]
pub struct PricingEngine {
    model: RateModel,
    client_name: String,
    preparer_name: String,
    tasks: Vec<Task>,
    max_uplift: Decimal,
    uplift_factors: Vec<AllocationFactor>,
    max_discount: Decimal,
    discount_factors: Vec<AllocationFactor>,
    currencies: CurrencyTable,

    applied_uplift_percent: Decimal,
    applied_discount_percent: Decimal,
    base_project_cost: Decimal,
    final_project_cost: Decimal,
    actual_day_rate: Decimal,
    actual_hourly_rate: Decimal,
}

impl PricingEngine {
    /// Creates an engine bound to the given model, with the built-in
    /// adjustment caps (20% uplift, 10% discount) and currency table.
    pub fn new(model: RateModel) -> Self {
        let mut engine = Self {
            model,
            client_name: String::new(),
            preparer_name: String::new(),
            tasks: Vec::new(),
            max_uplift: Decimal::from(20),
            uplift_factors: Vec::new(),
            max_discount: Decimal::from(10),
            discount_factors: Vec::new(),
            currencies: CurrencyTable::builtin(),
            applied_uplift_percent: Decimal::ZERO,
            applied_discount_percent: Decimal::ZERO,
            base_project_cost: Decimal::ZERO,
            final_project_cost: Decimal::ZERO,
            actual_day_rate: Decimal::ZERO,
            actual_hourly_rate: Decimal::ZERO,
        };
        engine.recompute();
        engine
    }

    /// Creates an engine seeded with configured caps and currency table.
    pub fn with_defaults(model: RateModel, defaults: &EngineDefaults) -> Self {
        let mut engine = Self::new(model);
        engine.max_uplift = defaults.adjustments.max_uplift;
        engine.max_discount = defaults.adjustments.max_discount;
        engine.currencies = defaults.currency_table();
        engine.recompute();
        engine
    }

    /// The full recompute cascade. Order matters: the uplift must reach the
    /// model and the task costs before the base cost is summed, and the
    /// discount applies to that uplift-inclusive base.
    fn recompute(&mut self) {
        self.applied_uplift_percent = applied_percent(&self.uplift_factors, self.max_uplift);
        self.model.apply_uplift(self.applied_uplift_percent);

        let day_rate = self.model.uplifted_day_rate();
        for task in &mut self.tasks {
            task.cost = task.days * day_rate;
        }
        self.base_project_cost = self.tasks.iter().map(|t| t.cost).sum();

        self.applied_discount_percent = applied_percent(&self.discount_factors, self.max_discount);
        self.final_project_cost = self.base_project_cost
            * (Decimal::ONE - self.applied_discount_percent / Decimal::ONE_HUNDRED);

        let total_days = self.total_days();
        if total_days.is_zero() {
            self.actual_day_rate = Decimal::ZERO;
            self.actual_hourly_rate = Decimal::ZERO;
        } else {
            self.actual_day_rate = self.final_project_cost / total_days;
            self.actual_hourly_rate = self.actual_day_rate / Decimal::from(HOURS_PER_DAY);
        }
    }

    // --- model passthrough ---------------------------------------------

    /// Applies a partial update to the rate model and recomputes.
    pub fn update_model(&mut self, update: RateModelUpdate) {
        self.model.update(update);
        self.recompute();
    }

    /// Changes the rate rounding mode and recomputes.
    pub fn set_rounding(&mut self, mode: RoundingMode) {
        self.model.set_rounding(mode);
        self.recompute();
    }

    /// Returns the underlying rate model.
    pub fn model(&self) -> &RateModel {
        &self.model
    }

    // --- project info --------------------------------------------------

    /// Sets the client name.
    pub fn set_client_name(&mut self, name: impl Into<String>) {
        self.client_name = name.into();
    }

    /// Sets the preparer name.
    pub fn set_preparer_name(&mut self, name: impl Into<String>) {
        self.preparer_name = name.into();
    }

    /// The client the project is being priced for.
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    /// The person preparing the pricing.
    pub fn preparer_name(&self) -> &str {
        &self.preparer_name
    }

    // --- tasks ---------------------------------------------------------

    /// Adds a task, generating an id when absent, and recomputes.
    ///
    /// Returns the task's id. The engine does not reject non-positive day
    /// estimates; callers validate at the boundary.
    pub fn add_task(&mut self, task: TaskInput) -> String {
        let id = task.id.unwrap_or_else(generate_id);
        let cost = task.days * self.model.uplifted_day_rate();
        self.tasks.push(Task {
            id: id.clone(),
            name: task.name,
            days: task.days,
            cost,
        });
        self.recompute();
        id
    }

    /// Removes a task by id and recomputes. Unknown ids are a no-op.
    pub fn remove_task(&mut self, task_id: &str) {
        self.tasks.retain(|t| t.id != task_id);
        self.recompute();
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Sum of task day estimates.
    pub fn total_days(&self) -> Decimal {
        self.tasks.iter().map(|t| t.days).sum()
    }

    // --- factors -------------------------------------------------------

    fn factors_mut(&mut self, category: FactorCategory) -> &mut Vec<AllocationFactor> {
        match category {
            FactorCategory::Uplift => &mut self.uplift_factors,
            FactorCategory::Discount => &mut self.discount_factors,
        }
    }

    /// Factors for a category, in insertion order.
    pub fn factors(&self, category: FactorCategory) -> &[AllocationFactor] {
        match category {
            FactorCategory::Uplift => &self.uplift_factors,
            FactorCategory::Discount => &self.discount_factors,
        }
    }

    /// Adds a factor to a category and recomputes.
    ///
    /// Generates an id when absent; `selected` defaults to true. Returns
    /// the factor's id.
    pub fn add_factor(&mut self, category: FactorCategory, factor: FactorInput) -> String {
        let id = factor.id.unwrap_or_else(generate_id);
        self.factors_mut(category).push(AllocationFactor {
            id: id.clone(),
            name: factor.name,
            allocation: factor.allocation,
            selected: factor.selected.unwrap_or(true),
        });
        self.recompute();
        id
    }

    /// Removes a factor by id and recomputes. Unknown ids are a no-op.
    pub fn remove_factor(&mut self, category: FactorCategory, factor_id: &str) {
        self.factors_mut(category).retain(|f| f.id != factor_id);
        self.recompute();
    }

    /// Changes a factor's allocation and recomputes. Unknown ids are a
    /// no-op and skip the recompute.
    pub fn update_factor_allocation(
        &mut self,
        category: FactorCategory,
        factor_id: &str,
        allocation: Decimal,
    ) {
        let Some(factor) = self
            .factors_mut(category)
            .iter_mut()
            .find(|f| f.id == factor_id)
        else {
            return;
        };
        factor.allocation = allocation;
        self.recompute();
    }

    /// Changes a factor's selection state and recomputes. Unknown ids are
    /// a no-op and skip the recompute.
    pub fn toggle_factor(&mut self, category: FactorCategory, factor_id: &str, selected: bool) {
        let Some(factor) = self
            .factors_mut(category)
            .iter_mut()
            .find(|f| f.id == factor_id)
        else {
            return;
        };
        factor.selected = selected;
        self.recompute();
    }

    /// Sets the maximum uplift percentage, clamped to [0, 100], and
    /// recomputes.
    pub fn set_max_uplift(&mut self, percent: Decimal) {
        self.max_uplift = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        self.recompute();
    }

    /// Sets the maximum discount percentage, clamped to [0, 100], and
    /// recomputes.
    pub fn set_max_discount(&mut self, percent: Decimal) {
        self.max_discount = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        self.recompute();
    }

    /// The maximum uplift percentage cap.
    pub fn max_uplift(&self) -> Decimal {
        self.max_uplift
    }

    /// The maximum discount percentage cap.
    pub fn max_discount(&self) -> Decimal {
        self.max_discount
    }

    /// Checks whether a category's allocations sum to 100, counting both
    /// selected and unselected factors.
    pub fn validate_factor_allocations(&self, category: FactorCategory) -> AllocationValidation {
        validate_allocations(self.factors(category))
    }

    // --- currencies ----------------------------------------------------

    /// Sets a currency's conversion rate. Unknown codes are a no-op.
    pub fn set_currency_rate(&mut self, code: &str, rate: Decimal) {
        self.currencies.set_rate(code, rate);
    }

    /// Enables or disables a display currency. Unknown codes are a no-op.
    pub fn toggle_currency(&mut self, code: &str, enabled: bool) {
        self.currencies.toggle(code, enabled);
    }

    /// Converts a base-currency amount; unknown codes return it unchanged.
    pub fn convert_currency(&self, amount: Decimal, code: &str) -> Decimal {
        self.currencies.convert(amount, code)
    }

    /// Enabled currencies in table order.
    pub fn enabled_currencies(&self) -> Vec<&Currency> {
        self.currencies.enabled()
    }

    /// The currency table.
    pub fn currencies(&self) -> &CurrencyTable {
        &self.currencies
    }

    // --- derived state -------------------------------------------------

    /// Uplift percentage currently applied to the day rate.
    pub fn applied_uplift_percent(&self) -> Decimal {
        self.applied_uplift_percent
    }

    /// Discount percentage currently applied to the base cost.
    pub fn applied_discount_percent(&self) -> Decimal {
        self.applied_discount_percent
    }

    /// Sum of task costs at the uplifted day rate.
    pub fn base_project_cost(&self) -> Decimal {
        self.base_project_cost
    }

    /// Base cost less the applied discount.
    pub fn final_project_cost(&self) -> Decimal {
        self.final_project_cost
    }

    /// Effective day rate implied by the final cost, zero with no tasks.
    pub fn actual_day_rate(&self) -> Decimal {
        self.actual_day_rate
    }

    /// Effective hourly rate implied by the final cost.
    pub fn actual_hourly_rate(&self) -> Decimal {
        self.actual_hourly_rate
    }

    /// Compares the actual day rate against the required day rate.
    pub fn rate_comparison(&self) -> RateComparison {
        let required_day_rate = self.model.required_day_rate();
        let actual_day_rate = self.actual_day_rate;

        let diff_percent = if required_day_rate.is_zero() {
            Decimal::ZERO
        } else {
            (actual_day_rate - required_day_rate) / required_day_rate * Decimal::ONE_HUNDRED
        };

        RateComparison {
            required_day_rate,
            actual_day_rate,
            diff_percent,
            is_sufficient: actual_day_rate >= required_day_rate,
        }
    }

    /// Builds the full internal summary of the priced project.
    pub fn summary(&self) -> ProjectSummary {
        let discount_amount =
            self.base_project_cost * (self.applied_discount_percent / Decimal::ONE_HUNDRED);

        ProjectSummary {
            client_name: self.client_name.clone(),
            preparer_name: self.preparer_name.clone(),
            tasks: self.tasks.clone(),
            total_days: self.total_days(),
            max_uplift: self.max_uplift,
            uplift_factors: self.uplift_factors.clone(),
            uplift_validation: self.validate_factor_allocations(FactorCategory::Uplift),
            max_discount: self.max_discount,
            discount_factors: self.discount_factors.clone(),
            discount_validation: self.validate_factor_allocations(FactorCategory::Discount),
            applied_uplift_percent: self.applied_uplift_percent,
            uplifted_day_rate: self.model.uplifted_day_rate(),
            base_project_cost: self.base_project_cost,
            applied_discount_percent: self.applied_discount_percent,
            discount_amount,
            final_project_cost: self.final_project_cost,
            actual_day_rate: self.actual_day_rate,
            actual_hourly_rate: self.actual_hourly_rate,
            rate_comparison: self.rate_comparison(),
        }
    }

    /// Builds the client-facing quote.
    ///
    /// The quote carries one unlabeled day rate with the uplift already
    /// baked in; the applied uplift percentage and its factors never appear
    /// here. The discount is disclosed. Converted totals cover enabled
    /// non-base currencies in table order.
    pub fn client_quote(&self) -> ClientQuote {
        let discount_amount =
            self.base_project_cost * (self.applied_discount_percent / Decimal::ONE_HUNDRED);

        let converted_totals = self
            .currencies
            .enabled()
            .into_iter()
            .filter(|c| c.code != self.currencies.base_currency())
            .map(|c| CurrencyAmount {
                code: c.code.clone(),
                symbol: c.symbol.clone(),
                display_name: c.display_name.clone(),
                amount: self.final_project_cost * c.conversion_rate,
            })
            .collect();

        ClientQuote {
            client_name: self.client_name.clone(),
            prepared_by: self.preparer_name.clone(),
            day_rate: self.model.uplifted_day_rate(),
            lines: self
                .tasks
                .iter()
                .map(|t| QuoteLine {
                    name: t.name.clone(),
                    days: t.days,
                    cost: t.cost,
                })
                .collect(),
            total_days: self.total_days(),
            subtotal: self.base_project_cost,
            discount_percent: self.applied_discount_percent,
            discount_amount,
            total: self.final_project_cost,
            base_currency: self.currencies.base_currency().to_string(),
            converted_totals,
        }
    }

    // --- snapshot import/export ----------------------------------------

    /// Serializes the engine state into an exchange snapshot.
    ///
    /// Every cost and rate field in the snapshot is re-derived from the
    /// current state at call time; nothing stale is serialized.
    pub fn export_snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot {
            version: SNAPSHOT_VERSION.to_string(),
            exported_at: Some(Utc::now()),
            business_model: Some(BusinessModelSection {
                salary_budget: Some(self.model.salary_budget()),
                growth_budget: Some(self.model.growth_budget()),
                working_weeks: Some(self.model.working_weeks()),
                team_members: Some(self.model.team_members()),
                hours_per_week: Some(self.model.hours_per_week()),
                rounding: Some(self.model.rounding()),
                uplifted_day_rate: Some(self.model.uplifted_day_rate()),
            }),
            project: Some(ProjectSection {
                client_name: Some(self.client_name.clone()),
                preparer_name: Some(self.preparer_name.clone()),
                tasks: Some(
                    self.tasks
                        .iter()
                        .map(|t| TaskRecord {
                            id: Some(t.id.clone()),
                            name: t.name.clone(),
                            days: t.days,
                        })
                        .collect(),
                ),
                max_uplift: Some(self.max_uplift),
                uplift_factors: Some(factor_records(&self.uplift_factors)),
                max_discount: Some(self.max_discount),
                discount_factors: Some(factor_records(&self.discount_factors)),
            }),
            currencies: Some(CurrencySection {
                base_currency: Some(self.currencies.base_currency().to_string()),
                rates: Some(
                    self.currencies
                        .entries()
                        .iter()
                        .map(|c| {
                            (
                                c.code.clone(),
                                CurrencyRateRecord {
                                    rate: Some(c.conversion_rate),
                                    enabled: Some(c.enabled),
                                },
                            )
                        })
                        .collect::<BTreeMap<_, _>>(),
                ),
            }),
        }
    }

    /// Serializes the engine state into a pretty-printed JSON snapshot.
    pub fn export_json(&self) -> EngineResult<String> {
        serde_json::to_string_pretty(&self.export_snapshot()).map_err(|e| {
            EngineError::SnapshotSerialize {
                message: e.to_string(),
            }
        })
    }

    /// Replaces the engine's mutable state from a JSON snapshot.
    ///
    /// Fails atomically: an unparseable payload or a missing version tag
    /// leaves the current state untouched. Sections absent from the payload
    /// leave their state unchanged; fields absent within a present section
    /// fall back to defaults (empty names, caps of 20/10, no rounding).
    /// Imported task costs are recomputed from the current model rather
    /// than trusted, unknown currency codes are ignored, and a full
    /// recompute always runs at the end.
    pub fn import_json(&mut self, json: &str) -> EngineResult<()> {
        let snapshot = parse_snapshot(json)?;
        self.apply_snapshot(snapshot);
        Ok(())
    }

    fn apply_snapshot(&mut self, snapshot: ProjectSnapshot) {
        if let Some(business) = snapshot.business_model {
            self.model.update(RateModelUpdate {
                salary_budget: business.salary_budget,
                growth_budget: business.growth_budget,
                working_weeks: business.working_weeks,
                team_members: business.team_members,
                hours_per_week: business.hours_per_week,
            });
            self.model
                .set_rounding(business.rounding.unwrap_or_default());
            // upliftedDayRate in the payload is informational; the closing
            // recompute re-derives it.
        }

        if let Some(project) = snapshot.project {
            self.client_name = project.client_name.unwrap_or_default();
            self.preparer_name = project.preparer_name.unwrap_or_default();

            let day_rate = self.model.uplifted_day_rate();
            self.tasks = project
                .tasks
                .unwrap_or_default()
                .into_iter()
                .map(|record| Task {
                    id: record.id.unwrap_or_else(generate_id),
                    name: record.name,
                    cost: record.days * day_rate,
                    days: record.days,
                })
                .collect();

            self.max_uplift = project
                .max_uplift
                .unwrap_or(Decimal::from(20))
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
            self.uplift_factors = restore_factors(project.uplift_factors.unwrap_or_default());

            self.max_discount = project
                .max_discount
                .unwrap_or(Decimal::from(10))
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
            self.discount_factors = restore_factors(project.discount_factors.unwrap_or_default());
        }

        if let Some(currencies) = snapshot.currencies {
            if let Some(base) = currencies.base_currency {
                self.currencies.set_base_currency(&base);
            }
            for (code, record) in currencies.rates.unwrap_or_default() {
                if let Some(rate) = record.rate {
                    self.currencies.set_rate(&code, rate);
                }
                if let Some(enabled) = record.enabled {
                    self.currencies.toggle(&code, enabled);
                }
            }
        }

        self.recompute();
    }
}

fn factor_records(factors: &[AllocationFactor]) -> Vec<FactorRecord> {
    factors
        .iter()
        .map(|f| FactorRecord {
            id: Some(f.id.clone()),
            name: f.name.clone(),
            allocation: f.allocation,
            selected: Some(f.selected),
        })
        .collect()
}

fn restore_factors(records: Vec<FactorRecord>) -> Vec<AllocationFactor> {
    records
        .into_iter()
        .map(|record| AllocationFactor {
            id: record.id.unwrap_or_else(generate_id),
            name: record.name,
            allocation: record.allocation,
            selected: record.selected.unwrap_or(true),
        })
        .collect()
}
