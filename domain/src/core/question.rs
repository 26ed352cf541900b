//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The question a poll asks (Value Object)
///
/// Always non-empty after trimming; the stored text is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, rejecting blank input
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            Err(DomainError::EmptyQuestion)
        } else {
            Ok(Self {
                content: trimmed.to_string(),
            })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::try_new("  Lunch?  ").unwrap();
        assert_eq!(q.content(), "Lunch?");
        assert_eq!(q.to_string(), "Lunch?");
    }

    #[test]
    fn test_blank_question_rejected() {
        assert_eq!(Question::try_new("   "), Err(DomainError::EmptyQuestion));
        assert_eq!(Question::try_new(""), Err(DomainError::EmptyQuestion));
    }
}
