//! Snapshot - the wire form of the progress store.
//!
//! The persisted format is a single JSON object with camelCase keys:
//! `{ completedLessons: [..], startDate: ISO-8601 | null, lastUpdate: ISO-8601 | null }`.
//! The completed set is written in insertion order so that output is
//! deterministic across save/load cycles.

use serde::{Deserialize, Serialize};

use crate::id::LessonId;
use crate::state::ProgressStore;
use crate::Time;

/// Serialized copy of a [`ProgressStore`], as written to durable storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    /// Completed lesson ids in insertion order
    pub completed_lessons: Vec<LessonId>,

    /// When the first lesson was completed
    pub start_date: Option<Time>,

    /// When the state last changed
    pub last_update: Option<Time>,
}

impl From<&ProgressStore> for Snapshot {
    fn from(store: &ProgressStore) -> Self {
        Self {
            completed_lessons: store.completed().to_vec(),
            start_date: store.start_date(),
            last_update: store.last_update(),
        }
    }
}

impl From<Snapshot> for ProgressStore {
    fn from(snapshot: Snapshot) -> Self {
        ProgressStore::from_parts(
            snapshot.completed_lessons,
            snapshot.start_date,
            snapshot.last_update,
        )
    }
}
