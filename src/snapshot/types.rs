//! Snapshot payload types.
//!
//! The wire format is camelCase JSON. Every section and nearly every field
//! is optional on the way in; the engine fills defaults for what is absent.
//! Task records carry no cost and the business section's uplifted day rate
//! is informational only: costs and rates are always re-derived on import.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::RoundingMode;

/// The version tag written by the current engine.
pub const SNAPSHOT_VERSION: &str = "1.2";

/// The complete exchange payload for a pricing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    /// Format version tag; its presence is mandatory on import.
    pub version: String,
    /// When the snapshot was exported. Ignored on import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    /// Rate model inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_model: Option<BusinessModelSection>,
    /// Project tasks, factors, and caps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectSection>,
    /// Currency table configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currencies: Option<CurrencySection>,
}

/// Rate model inputs as exchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessModelSection {
    /// Annual salary budget target.
    #[serde(default)]
    pub salary_budget: Option<Decimal>,
    /// Annual growth/profit target.
    #[serde(default)]
    pub growth_budget: Option<Decimal>,
    /// Weeks worked per year.
    #[serde(default)]
    pub working_weeks: Option<Decimal>,
    /// Headcount sharing the budget.
    #[serde(default)]
    pub team_members: Option<Decimal>,
    /// Billable hours per member per week.
    #[serde(default)]
    pub hours_per_week: Option<Decimal>,
    /// Rate rounding mode: `"none"` or an integer increment.
    #[serde(default)]
    pub rounding: Option<RoundingMode>,
    /// Uplifted day rate at export time. Informational; re-derived on
    /// import.
    #[serde(default)]
    pub uplifted_day_rate: Option<Decimal>,
}

/// Project state as exchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSection {
    /// Client the project is priced for.
    #[serde(default)]
    pub client_name: Option<String>,
    /// Person preparing the pricing.
    #[serde(default)]
    pub preparer_name: Option<String>,
    /// Tasks in insertion order.
    #[serde(default)]
    pub tasks: Option<Vec<TaskRecord>>,
    /// Maximum uplift percentage cap.
    #[serde(default)]
    pub max_uplift: Option<Decimal>,
    /// Uplift factors in insertion order.
    #[serde(default)]
    pub uplift_factors: Option<Vec<FactorRecord>>,
    /// Maximum discount percentage cap.
    #[serde(default)]
    pub max_discount: Option<Decimal>,
    /// Discount factors in insertion order.
    #[serde(default)]
    pub discount_factors: Option<Vec<FactorRecord>>,
}

/// A task as exchanged. Carries no cost: costs are re-derived on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task id; regenerated when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Human-readable task name.
    pub name: String,
    /// Estimated effort in days.
    pub days: Decimal,
}

/// An allocation factor as exchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorRecord {
    /// Factor id; regenerated when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Human-readable factor name.
    pub name: String,
    /// Share of the category maximum, in percent of 100.
    pub allocation: Decimal,
    /// Selection state; defaults to selected when absent.
    #[serde(default)]
    pub selected: Option<bool>,
}

/// Currency configuration as exchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencySection {
    /// The base currency code.
    #[serde(default)]
    pub base_currency: Option<String>,
    /// Rate and enablement per currency code. Unknown codes are ignored
    /// on import.
    #[serde(default)]
    pub rates: Option<BTreeMap<String, CurrencyRateRecord>>,
}

/// Rate and enablement for one currency code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRateRecord {
    /// Units of this currency per one base-currency unit.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Whether the currency is shown in converted totals.
    #[serde(default)]
    pub enabled: Option<bool>,
}
