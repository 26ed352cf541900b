//! Option Label Mapper
//!
//! Pairs option indices with reaction markers and maps reactions back to
//! indices. Markers are the keycap digits `1️⃣`..`9️⃣` followed by `🔟`;
//! an N-option round uses the first N of them.

use crate::core::error::DomainError;
use serde::Serialize;

/// Smallest option count a round accepts.
pub const MIN_OPTIONS: usize = 2;

/// Largest option count a round accepts (one per available marker).
pub const MAX_OPTIONS: usize = 10;

static MARKER_GLYPHS: [&str; MAX_OPTIONS] = [
    "1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🔟",
];

/// A reaction target standing in for one option index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Marker(&'static str);

impl Marker {
    /// The full ordered marker sequence.
    pub fn all() -> impl Iterator<Item = Marker> {
        MARKER_GLYPHS.iter().map(|g| Marker(*g))
    }

    /// Marker at a 1-based position (`1` → `1️⃣`, `10` → `🔟`).
    pub fn from_position(position: usize) -> Option<Marker> {
        position
            .checked_sub(1)
            .and_then(|i| MARKER_GLYPHS.get(i))
            .map(|g| Marker(*g))
    }

    /// Look up a marker by its glyph.
    pub fn from_glyph(glyph: &str) -> Option<Marker> {
        MARKER_GLYPHS.iter().find(|g| **g == glyph).map(|g| Marker(*g))
    }

    /// The glyph shown on the platform.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl PartialEq<str> for Marker {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Marker {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Markers issued for one round, positionally paired with option indices.
///
/// # Example
///
/// ```
/// use ballot_domain::poll::MarkerAssignment;
///
/// let assignment = MarkerAssignment::for_options(3).unwrap();
/// assert_eq!(assignment.len(), 3);
/// assert_eq!(assignment.index_for_marker("2️⃣"), Some(1));
/// assert_eq!(assignment.index_for_marker("4️⃣"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerAssignment {
    markers: Vec<Marker>,
}

impl MarkerAssignment {
    /// Assign the first `option_count` markers.
    pub fn for_options(option_count: usize) -> Result<Self, DomainError> {
        Ok(Self {
            markers: assign_markers(option_count)?,
        })
    }

    /// Index of `marker` among the active markers.
    pub fn index_for_marker(&self, marker: &str) -> Option<usize> {
        index_for_marker(marker, &self.markers)
    }

    /// Marker assigned to option `index`.
    pub fn marker_at(&self, index: usize) -> Option<Marker> {
        self.markers.get(index).copied()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Return the first `option_count` markers, in order.
pub fn assign_markers(option_count: usize) -> Result<Vec<Marker>, DomainError> {
    if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&option_count) {
        return Err(DomainError::InvalidOptionCount(option_count));
    }
    Ok(Marker::all().take(option_count).collect())
}

/// Index of `marker` within `active`, or `None` if it is not active.
pub fn index_for_marker(marker: &str, active: &[Marker]) -> Option<usize> {
    active.iter().position(|m| *m == marker)
}
