//! Allocation factor model and related types.
//!
//! One factor type serves both adjustment categories: uplift factors feed the
//! markup baked into the day rate, discount factors feed the reduction taken
//! off the base project cost. Operations are tagged with a [`FactorCategory`]
//! rather than duplicating the type per category.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The adjustment category an allocation factor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorCategory {
    /// Markup factors, baked into the day rate before cost summation.
    Uplift,
    /// Reduction factors, applied to the uplift-inclusive base cost.
    Discount,
}

impl fmt::Display for FactorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactorCategory::Uplift => write!(f, "uplift"),
            FactorCategory::Discount => write!(f, "discount"),
        }
    }
}

/// A named, weighted, independently toggleable contributor to an adjustment.
///
/// A selected factor contributes `allocation / 100` of the category's maximum
/// percentage. Allocations across a category are not required to sum to 100;
/// a separate validation reports the shortfall or excess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationFactor {
    /// Unique identifier for the factor.
    pub id: String,
    /// Human-readable factor name.
    pub name: String,
    /// Share of the category maximum, in percent of 100.
    pub allocation: Decimal,
    /// Whether the factor currently contributes to the applied percentage.
    pub selected: bool,
}

/// Input for adding a factor to the engine.
///
/// If `id` is omitted a fresh unique id is generated; `selected` defaults
/// to `true` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorInput {
    /// Optional explicit id; generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Human-readable factor name.
    pub name: String,
    /// Share of the category maximum, in percent of 100.
    pub allocation: Decimal,
    /// Optional initial selection state; defaults to selected.
    #[serde(default)]
    pub selected: Option<bool>,
}
