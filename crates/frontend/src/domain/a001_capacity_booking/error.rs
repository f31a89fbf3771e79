use thiserror::Error;

use super::validation::ValidationIssue;

/// Errors of the booking screen core.
///
/// Store failures are split into `Network` and `NotFound`; `Validation` never
/// reaches the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("booking {0} not found")]
    NotFound(String),
    #[error("validation failed ({} issue(s))", .0.len())]
    Validation(Vec<ValidationIssue>),
    #[error("the active booking has not been saved yet")]
    MissingId,
    #[error("trailer slot index {index} out of range (len {len})")]
    SlotIndexOutOfRange { index: usize, len: usize },
    #[error("unknown field: {0}")]
    UnknownField(String),
}

impl BookingError {
    /// Translation key for the notice shown to the user
    pub fn message_key(&self) -> &'static str {
        match self {
            BookingError::Network(_) => "ERROR_NETWORK",
            BookingError::NotFound(_) => "ERROR_NOT_FOUND",
            BookingError::Validation(_) => "ERROR_VALIDATION",
            BookingError::MissingId => "ERROR_NOT_SAVED",
            BookingError::SlotIndexOutOfRange { .. } | BookingError::UnknownField(_) => {
                "ERROR_UNEXPECTED"
            }
        }
    }
}
