//! Error types for Dockforge

use std::fmt;

use thiserror::Error;

/// Main error type for Dockforge operations
#[derive(Debug, Error)]
pub enum DockforgeError {
    /// Malformed or incomplete request, rejected before model construction
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    /// Internal error (numeric fault or broken invariant)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Dockforge operations
pub type Result<T> = std::result::Result<T, DockforgeError>;

/// Kind of record an [`InputError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Ship,
    Dock,
    Allocation,
    Weather,
    Request,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Ship => write!(f, "ship"),
            RecordKind::Dock => write!(f, "dock"),
            RecordKind::Allocation => write!(f, "allocation"),
            RecordKind::Weather => write!(f, "weather"),
            RecordKind::Request => write!(f, "request"),
        }
    }
}

/// Validation failure raised while normalizing a request.
///
/// `id` is the record's own id when it has one, otherwise its position in
/// the request (`#3`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{record} '{id}' is missing required field '{field}'")]
    MissingField {
        record: RecordKind,
        id: String,
        field: &'static str,
    },

    #[error("{record} '{id}' has invalid {field}: {reason}")]
    InvalidValue {
        record: RecordKind,
        id: String,
        field: &'static str,
        reason: String,
    },

    #[error("duplicate {record} id '{id}'")]
    DuplicateId { record: RecordKind, id: String },

    #[error(
        "unknown optimization criterion '{0}' (expected waiting_time, dock_utilization or balanced)"
    )]
    UnknownCriterion(String),
}

impl InputError {
    /// Shorthand for [`InputError::MissingField`].
    pub fn missing(record: RecordKind, id: impl Into<String>, field: &'static str) -> Self {
        InputError::MissingField {
            record,
            id: id.into(),
            field,
        }
    }

    /// Shorthand for [`InputError::InvalidValue`].
    pub fn invalid(
        record: RecordKind,
        id: impl Into<String>,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        InputError::InvalidValue {
            record,
            id: id.into(),
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = InputError::missing(RecordKind::Ship, "s1", "draft");
        assert_eq!(err.to_string(), "ship 's1' is missing required field 'draft'");
    }

    #[test]
    fn test_input_error_converts() {
        let err: DockforgeError = InputError::UnknownCriterion("fastest".into()).into();
        assert!(matches!(err, DockforgeError::Input(_)));
        assert!(err.to_string().starts_with("Invalid input: unknown optimization criterion"));
    }
}
