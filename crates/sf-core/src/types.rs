//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for core types and manual session entries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty or only whitespace.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A session duration that is not a positive number of minutes.
    #[error("duration must be greater than 0 minutes, got {minutes}")]
    InvalidDuration { minutes: i64 },
}

/// Generates a validated, trimmed, non-empty string newtype.
macro_rules! define_label {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new value after trimming and validation.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                if trimmed.len() == value.len() {
                    Ok(Self(value))
                } else {
                    Ok(Self(trimmed.to_string()))
                }
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_label!(
    /// A validated study session identifier.
    ///
    /// Generated sessions use a random UUID; uniqueness is the only invariant.
    SessionId, "session ID"
);

define_label!(
    /// What was studied (e.g., "Calculus II").
    Subject, "subject"
);

define_label!(
    /// How it was studied (e.g., "Problem solving").
    Activity, "activity"
);

impl SessionId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the first `len` characters, for compact display.
    pub fn short(&self, len: usize) -> &str {
        self.0
            .char_indices()
            .nth(len)
            .map_or(self.0.as_str(), |(idx, _)| &self.0[..idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_rejects_empty() {
        assert_eq!(
            Subject::new("").unwrap_err(),
            ValidationError::Empty { field: "subject" }
        );
        assert!(Subject::new("Chemistry").is_ok());
    }

    #[test]
    fn activity_rejects_whitespace_only() {
        assert_eq!(
            Activity::new("   ").unwrap_err(),
            ValidationError::Empty { field: "activity" }
        );
    }

    #[test]
    fn labels_are_trimmed() {
        let subject = Subject::new("  Calculus II ").unwrap();
        assert_eq!(subject.as_str(), "Calculus II");
    }

    #[test]
    fn subject_serializes_as_plain_string() {
        let subject = Subject::new("Physics").unwrap();
        let json = serde_json::to_string(&subject).unwrap();
        assert_eq!(json, "\"Physics\"");
    }

    #[test]
    fn subject_serde_rejects_empty() {
        let result: Result<Subject, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn generated_session_ids_are_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn session_id_short_prefix() {
        let id = SessionId::new("abcdef-123").unwrap();
        assert_eq!(id.short(6), "abcdef");
        assert_eq!(id.short(50), "abcdef-123");
    }

    #[test]
    fn validation_error_messages() {
        assert_eq!(
            ValidationError::Empty { field: "subject" }.to_string(),
            "subject cannot be empty"
        );
        assert_eq!(
            ValidationError::InvalidDuration { minutes: 0 }.to_string(),
            "duration must be greater than 0 minutes, got 0"
        );
    }
}
