//! Identifiers for studytrack entities.
//!
//! Both identifiers are owned by the plan document rather than generated
//! here: a lesson carries a stable string id, a phase a small number.

use serde::{Deserialize, Serialize};

/// Stable identifier of a lesson
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(String);

impl LessonId {
    /// Create a LessonId from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LessonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for LessonId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LessonId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Numeric identifier of a phase
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PhaseNumber(u32);

impl PhaseNumber {
    /// Create a PhaseNumber
    pub fn new(n: u32) -> Self {
        Self(n)
    }

    /// The raw number
    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PhaseNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for PhaseNumber {
    fn from(n: u32) -> Self {
        Self(n)
    }
}
