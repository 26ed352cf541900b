//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("At least two options are required, got {0}")]
    InsufficientOptions(usize),

    #[error("Option count must be between 2 and 10, got {0}")]
    InvalidOptionCount(usize),

    #[error("Question cannot be empty")]
    EmptyQuestion,
}

impl DomainError {
    /// Check if this error comes from the size of the option list
    pub fn is_option_count(&self) -> bool {
        matches!(
            self,
            DomainError::InsufficientOptions(_) | DomainError::InvalidOptionCount(_)
        )
    }
}
