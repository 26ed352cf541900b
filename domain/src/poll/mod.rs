//! Poll domain
//!
//! Reaction-based polls that break ties by re-running among the tied options.
//!
//! # Round lifecycle
//!
//! ```text
//! ┌──────────────┐  markers   ┌─────────────┐  window   ┌──────────────┐
//! │  OptionSet   │──────────▶│ PollSession │─────────▶│ RoundResult  │
//! │ (2..=10)     │            │   (OPEN)    │  elapses  │ counts/max   │
//! └──────────────┘            └─────────────┘           └──────┬───────┘
//!        ▲                                                     │
//!        │            tie: restrict to tied options            │
//!        └─────────────────────────────────────────────────────┘
//! ```
//!
//! - [`marker`] - Option Label Mapper (index ↔ reaction marker)
//! - [`tally`] - Vote Tally (counts, max, winners)
//! - [`session`] - Poll Session (open → record → close)
//! - [`announcement`] - texts published to the channel

pub mod announcement;
pub mod marker;
pub mod options;
pub mod outcome;
pub mod session;
pub mod tally;

// Re-export main types
pub use announcement::{Accent, Announcement, OptionLine, PollMessage};
pub use marker::{MAX_OPTIONS, MIN_OPTIONS, Marker, MarkerAssignment, assign_markers, index_for_marker};
pub use options::OptionSet;
pub use outcome::PollOutcome;
pub use session::{ClosedRound, PollSession, ReactionEvent, RoundKind, SessionState, VoteEffect};
pub use tally::{RoundOutcome, RoundResult, VoteRecord, resolve, tally};
