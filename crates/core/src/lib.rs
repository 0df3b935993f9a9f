//! studytrack core data models.
//!
//! This crate defines the progress store, the plan document model and
//! the snapshot wire format shared by every other crate.

#![warn(missing_docs)]

// Core identities
mod id;

// Plan document (the checklist the page renders)
mod plan;

// Progress state and persistence wire form
mod snapshot;
mod state;

// Re-exports
pub use id::{LessonId, PhaseNumber};
pub use plan::{LessonDef, PhaseDef, Plan};
pub use snapshot::Snapshot;
pub use state::{percentage, ProgressStats, ProgressStore};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
