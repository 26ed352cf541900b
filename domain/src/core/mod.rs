//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`] - channel, voter and message identifiers
//! - [`question::Question`] - a validated poll question
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod ids;
pub mod question;
