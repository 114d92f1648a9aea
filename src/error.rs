//! Error types for the Pricing Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only operations that can genuinely fail return errors: snapshot parsing,
//! defaults loading, and session lookup. Engine arithmetic never faults;
//! unknown ids and zero denominators produce degenerate results instead.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the Pricing Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use pricing_engine::error::EngineError;
///
/// let error = EngineError::SnapshotMissingVersion;
/// assert_eq!(error.to_string(), "Snapshot is missing the version tag");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A snapshot payload could not be parsed.
    #[error("Failed to parse snapshot: {message}")]
    SnapshotParse {
        /// A description of the parse error.
        message: String,
    },

    /// A snapshot payload did not carry a version tag.
    #[error("Snapshot is missing the version tag")]
    SnapshotMissingVersion,

    /// Engine state could not be serialized into a snapshot.
    #[error("Failed to serialize snapshot: {message}")]
    SnapshotSerialize {
        /// A description of the serialization error.
        message: String,
    },

    /// The defaults file was not found at the specified path.
    #[error("Defaults file not found: {path}")]
    DefaultsNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The defaults file could not be parsed.
    #[error("Failed to parse defaults file '{path}': {message}")]
    DefaultsParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No pricing session exists for the given id.
    #[error("Pricing session not found: {id}")]
    SessionNotFound {
        /// The session id that was not found.
        id: Uuid,
    },

    /// Input rejected at the API boundary.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_parse_displays_message() {
        let error = EngineError::SnapshotParse {
            message: "expected value at line 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse snapshot: expected value at line 1"
        );
    }

    #[test]
    fn test_snapshot_missing_version_message() {
        let error = EngineError::SnapshotMissingVersion;
        assert_eq!(error.to_string(), "Snapshot is missing the version tag");
    }

    #[test]
    fn test_defaults_not_found_displays_path() {
        let error = EngineError::DefaultsNotFound {
            path: "/missing/defaults.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Defaults file not found: /missing/defaults.yaml"
        );
    }

    #[test]
    fn test_defaults_parse_displays_path_and_message() {
        let error = EngineError::DefaultsParse {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse defaults file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_session_not_found_displays_id() {
        let error = EngineError::SessionNotFound { id: Uuid::nil() };
        assert_eq!(
            error.to_string(),
            "Pricing session not found: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "days".to_string(),
            message: "must be greater than zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input for 'days': must be greater than zero"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_version() -> EngineResult<()> {
            Err(EngineError::SnapshotMissingVersion)
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_version()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
