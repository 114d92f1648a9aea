//! Task model for project pricing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single unit of estimated project work, priced in days.
///
/// `cost` is a derived field: it equals `days` multiplied by the uplifted
/// day rate at the time of the last recompute, and is refreshed on every
/// engine recompute. Task order is insertion order and is preserved in
/// summaries, quotes, and snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: String,
    /// Human-readable task name.
    pub name: String,
    /// Estimated effort in days.
    pub days: Decimal,
    /// Cached cost at the uplifted day rate.
    pub cost: Decimal,
}

/// Input for adding a task to the engine.
///
/// If `id` is omitted a fresh unique id is generated on insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    /// Optional explicit id; generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Human-readable task name.
    pub name: String,
    /// Estimated effort in days.
    pub days: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_task_serialization_round_trip() {
        let task = Task {
            id: "task_001".to_string(),
            name: "Discovery workshop".to_string(),
            days: dec("3"),
            cost: dec("1800"),
        };

        let json = serde_json::to_string(&task).unwrap();
        let deserialized: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(task, deserialized);
    }

    #[test]
    fn test_task_input_without_id() {
        let json = r#"{"name": "Build", "days": "10"}"#;
        let input: TaskInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.id, None);
        assert_eq!(input.name, "Build");
        assert_eq!(input.days, dec("10"));
    }

    #[test]
    fn test_task_input_accepts_numeric_days() {
        let json = r#"{"name": "Build", "days": 10}"#;
        let input: TaskInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.days, dec("10"));
    }
}
