//! Snapshot exchange format for pricing sessions.
//!
//! A snapshot is the version-tagged, JSON-shaped payload used to move a
//! pricing session's mutable state in and out of the engine. Parsing is
//! strict about exactly one thing: the version tag must be present. All
//! other sections and fields are optional, letting older payloads import
//! with defaults filled in.
//!
//! File dialogs, download framing, and other transport mechanics live
//! outside this crate; this module only defines the payload and its
//! validation.

mod types;

pub use types::{
    BusinessModelSection, CurrencyRateRecord, CurrencySection, FactorRecord, ProjectSection,
    ProjectSnapshot, SNAPSHOT_VERSION, TaskRecord,
};

use crate::error::{EngineError, EngineResult};

/// Parses a snapshot payload, rejecting it when the version tag is absent.
///
/// The whole payload is validated before anything is returned, which is
/// what lets the engine's import fail atomically.
///
/// # Errors
///
/// Returns [`EngineError::SnapshotParse`] for malformed JSON and
/// [`EngineError::SnapshotMissingVersion`] when the payload parses but
/// carries no version string.
pub fn parse_snapshot(json: &str) -> EngineResult<ProjectSnapshot> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| EngineError::SnapshotParse {
            message: e.to_string(),
        })?;

    match value.get("version") {
        Some(version) if version.is_string() => {}
        _ => return Err(EngineError::SnapshotMissingVersion),
    }

    serde_json::from_value(value).map_err(|e| EngineError::SnapshotParse {
        message: e.to_string(),
    })
}
