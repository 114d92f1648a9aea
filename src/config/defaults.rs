//! Engine defaults types and loading.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Currency, CurrencyTable};

/// Capacity inputs a new rate model starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityDefaults {
    /// Weeks worked per year.
    pub working_weeks: Decimal,
    /// Headcount sharing the budget.
    pub team_members: Decimal,
    /// Billable hours per member per week.
    pub hours_per_week: Decimal,
}

/// Adjustment caps a new engine starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentDefaults {
    /// Maximum uplift percentage.
    pub max_uplift: Decimal,
    /// Maximum discount percentage.
    pub max_discount: Decimal,
}

/// Currency table configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyDefaults {
    /// The base currency code.
    pub base: String,
    /// Ordered currency entries.
    pub entries: Vec<Currency>,
}

/// The full set of defaults for new pricing sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineDefaults {
    /// Capacity inputs for the rate model.
    pub capacity: CapacityDefaults,
    /// Uplift and discount caps.
    pub adjustments: AdjustmentDefaults,
    /// Currency table configuration.
    pub currencies: CurrencyDefaults,
}

impl EngineDefaults {
    /// Loads defaults from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DefaultsNotFound`] when the file is missing
    /// and [`EngineError::DefaultsParse`] when it contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::DefaultsNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::DefaultsParse {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the compiled-in defaults: 48 working weeks, one member at
    /// 35 hours per week, 20% max uplift, 10% max discount, and the NZD
    /// currency table.
    pub fn builtin() -> Self {
        let table = CurrencyTable::builtin();
        Self {
            capacity: CapacityDefaults {
                working_weeks: Decimal::from(48),
                team_members: Decimal::ONE,
                hours_per_week: Decimal::from(35),
            },
            adjustments: AdjustmentDefaults {
                max_uplift: Decimal::from(20),
                max_discount: Decimal::from(10),
            },
            currencies: CurrencyDefaults {
                base: table.base_currency().to_string(),
                entries: table.entries().to_vec(),
            },
        }
    }

    /// Builds a currency table from the configured entries.
    pub fn currency_table(&self) -> CurrencyTable {
        CurrencyTable::new(self.currencies.base.clone(), self.currencies.entries.clone())
    }
}

impl Default for EngineDefaults {
    fn default() -> Self {
        Self::builtin()
    }
}
