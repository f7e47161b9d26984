//! Error types for postcal-core.
//!
//! Every engine operation fails closed with one of these kinds. Nothing is
//! logged here and no failure is papered over with a default value; the
//! caller decides how to surface it.

use std::fmt;

use thiserror::Error;

/// The form field a user-input error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    /// The `YYYY-MM-DD` date field.
    Date,
    /// The `HH:MM` time field.
    Time,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputField::Date => write!(f, "date"),
            InputField::Time => write!(f, "time"),
        }
    }
}

/// The main error type for civil-time operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// A stored timestamp could not be read as a real calendar instant.
    #[error("Invalid instant '{input}': {reason}")]
    InvalidInstant { input: String, reason: String },

    /// Civil fields that cannot be normalized onto the calendar.
    #[error("Invalid civil fields: {0}")]
    InvalidCivilFields(String),

    /// Malformed date or time text from a form.
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidUserInput {
        field: InputField,
        value: String,
        reason: String,
    },
}

impl CalendarError {
    pub(crate) fn instant(input: impl Into<String>, reason: impl Into<String>) -> Self {
        CalendarError::InvalidInstant {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn user_input(
        field: InputField,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalendarError::InvalidUserInput {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// The offending form field, for user-input errors.
    pub fn field(&self) -> Option<InputField> {
        match self {
            CalendarError::InvalidUserInput { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Result type alias for civil-time operations.
pub type Result<T> = std::result::Result<T, CalendarError>;
