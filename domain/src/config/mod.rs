//! Configuration value objects for the domain layer
//!
//! Issue types shared by every layer that validates configuration.

pub mod validation;

pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
