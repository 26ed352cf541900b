//! Option Set value object

use super::marker::{MAX_OPTIONS, MIN_OPTIONS};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Ordered, distinct option labels for one round.
///
/// Holds between [`MIN_OPTIONS`] and [`MAX_OPTIONS`] entries and is never
/// mutated once built; a tie-break round gets a fresh set via
/// [`OptionSet::restrict_to`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    options: Vec<String>,
}

impl OptionSet {
    /// Build an option set from already separated labels.
    ///
    /// Labels are trimmed; blank labels and repeats of an earlier label are
    /// dropped before the size check.
    pub fn new<I, S>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options: Vec<String> = Vec::new();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() || options.iter().any(|o| o == label) {
                continue;
            }
            options.push(label.to_string());
        }

        match options.len() {
            n if n < MIN_OPTIONS => Err(DomainError::InsufficientOptions(n)),
            n if n > MAX_OPTIONS => Err(DomainError::InvalidOptionCount(n)),
            _ => Ok(Self { options }),
        }
    }

    /// Parse a comma-delimited list such as `"Pizza, Tacos"`.
    ///
    /// # Example
    ///
    /// ```
    /// use ballot_domain::poll::OptionSet;
    ///
    /// let set = OptionSet::parse_delimited("Pizza, Tacos ,Sushi").unwrap();
    /// assert_eq!(set.labels(), ["Pizza", "Tacos", "Sushi"]);
    /// assert!(OptionSet::parse_delimited("Pizza").is_err());
    /// ```
    pub fn parse_delimited(input: &str) -> Result<Self, DomainError> {
        Self::new(input.split(','))
    }

    /// A new set holding only the options at `indices`, in their original order.
    pub fn restrict_to(&self, indices: &[usize]) -> Result<Self, DomainError> {
        let mut kept: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|i| *i < self.options.len())
            .collect();
        kept.sort_unstable();
        kept.dedup();
        Self::new(kept.into_iter().map(|i| self.options[i].as_str()))
    }

    /// Label at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(String::as_str)
    }
}
