//! Request types for the Pricing Engine API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{RateModelUpdate, RoundingMode};

/// Request body for creating a pricing session.
///
/// All fields are optional; a bare `{}` (or empty body) creates a session
/// from the configured defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// Initial rate model inputs.
    #[serde(default)]
    pub model: Option<RateModelUpdate>,
    /// Initial client name.
    #[serde(default)]
    pub client_name: Option<String>,
    /// Initial preparer name.
    #[serde(default)]
    pub preparer_name: Option<String>,
}

/// Request body for setting the project's client and preparer names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectNamesRequest {
    /// New client name, if changing.
    #[serde(default)]
    pub client_name: Option<String>,
    /// New preparer name, if changing.
    #[serde(default)]
    pub preparer_name: Option<String>,
}

/// Request body for adding a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTaskRequest {
    /// Optional explicit task id.
    #[serde(default)]
    pub id: Option<String>,
    /// Task name.
    pub name: String,
    /// Estimated effort in days. Must be positive.
    pub days: Decimal,
}

/// Request body for adding an allocation factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFactorRequest {
    /// Optional explicit factor id.
    #[serde(default)]
    pub id: Option<String>,
    /// Factor name.
    pub name: String,
    /// Share of the category maximum. Must be positive.
    pub allocation: Decimal,
    /// Initial selection state; defaults to selected.
    #[serde(default)]
    pub selected: Option<bool>,
}

/// Request body for updating an allocation factor.
///
/// Fields left absent are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFactorRequest {
    /// New allocation share. Must be positive when present.
    #[serde(default)]
    pub allocation: Option<Decimal>,
    /// New selection state.
    #[serde(default)]
    pub selected: Option<bool>,
}

/// Request body for adjustment and rounding settings.
///
/// Fields left absent are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsRequest {
    /// New maximum uplift percentage; clamped to [0, 100].
    #[serde(default)]
    pub max_uplift: Option<Decimal>,
    /// New maximum discount percentage; clamped to [0, 100].
    #[serde(default)]
    pub max_discount: Option<Decimal>,
    /// New rate rounding mode.
    #[serde(default)]
    pub rounding: Option<RoundingMode>,
}

/// Request body for updating a currency entry.
///
/// Fields left absent are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrencyUpdateRequest {
    /// New conversion rate.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// New enablement state.
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_create_session_request_accepts_empty_object() {
        let request: CreateSessionRequest = serde_json::from_str("{}").unwrap();
        assert!(request.model.is_none());
        assert!(request.client_name.is_none());
    }

    #[test]
    fn test_settings_request_parses_rounding_keyword() {
        let request: SettingsRequest =
            serde_json::from_str(r#"{"rounding": "none", "max_uplift": "25"}"#).unwrap();
        assert_eq!(request.rounding, Some(RoundingMode::None));
        assert_eq!(
            request.max_uplift,
            Some(Decimal::from_str("25").unwrap())
        );
        assert_eq!(request.max_discount, None);
    }

    #[test]
    fn test_add_task_request_requires_name_and_days() {
        let result = serde_json::from_str::<AddTaskRequest>(r#"{"name": "Build"}"#);
        assert!(result.is_err());
    }
}
