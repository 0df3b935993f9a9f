//! Progress store - the authoritative completion record.

use crate::id::LessonId;
use crate::Time;

/// Authoritative record of completed lessons and timestamps.
///
/// There is exactly one store per running session; it is owned by the
/// caller and passed by reference into sync, render and report code.
/// The completed set keeps insertion order so that serialization is
/// deterministic, even though membership itself is unordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressStore {
    completed: Vec<LessonId>,
    start_date: Option<Time>,
    last_update: Option<Time>,
}

/// Aggregate completion statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStats {
    /// Total lessons in the plan
    pub total: usize,

    /// Completed lessons
    pub completed: usize,

    /// Rounded completion percentage, 0 when total is 0
    pub percentage: u32,

    /// Projected days until completion at the observed daily rate;
    /// 0 when nothing is completed yet or no start date exists
    pub estimated_days_remaining: i64,
}

impl ProgressStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from its persisted parts. Duplicate ids are
    /// dropped, keeping the first occurrence.
    pub fn from_parts(
        completed: Vec<LessonId>,
        start_date: Option<Time>,
        last_update: Option<Time>,
    ) -> Self {
        let mut store = Self {
            completed: Vec::with_capacity(completed.len()),
            start_date,
            last_update,
        };
        for id in completed {
            if !store.completed.contains(&id) {
                store.completed.push(id);
            }
        }
        store
    }

    /// Completed lesson ids in insertion order.
    pub fn completed(&self) -> &[LessonId] {
        &self.completed
    }

    /// Number of completed lessons.
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Whether the given lesson is completed.
    pub fn is_completed(&self, id: &LessonId) -> bool {
        self.completed.contains(id)
    }

    /// When the first lesson was completed, if any ever was.
    pub fn start_date(&self) -> Option<Time> {
        self.start_date
    }

    /// When the state last changed.
    pub fn last_update(&self) -> Option<Time> {
        self.last_update
    }

    /// Replace the completed set with the ids that are currently
    /// checked, in iteration order (duplicates dropped).
    ///
    /// The start date is set on the first transition to a non-empty set
    /// and never touched again; unchecking everything does not clear it.
    /// The last-update timestamp is refreshed on every call.
    pub fn sync_checked<I>(&mut self, checked: I, now: Time)
    where
        I: IntoIterator<Item = LessonId>,
    {
        self.completed.clear();
        for id in checked {
            if !self.completed.contains(&id) {
                self.completed.push(id);
            }
        }

        if self.start_date.is_none() && !self.completed.is_empty() {
            self.start_date = Some(now);
        }
        self.last_update = Some(now);
    }

    /// Clear everything: completed set, start date, last update.
    ///
    /// Purging the persisted snapshot is the caller's job.
    pub fn reset(&mut self) {
        self.completed.clear();
        self.start_date = None;
        self.last_update = None;
    }

    /// Whole days elapsed since the start date, `None` when unset.
    pub fn study_days(&self, now: Time) -> Option<i64> {
        self.start_date.map(|start| (now - start).num_days())
    }

    /// Compute aggregate statistics against the plan's lesson count.
    pub fn stats(&self, total_lessons: usize, now: Time) -> ProgressStats {
        let completed = self.completed.len();

        let estimated_days_remaining = match self.start_date {
            Some(start) if completed > 0 => {
                // At least one day passed, so a same-day start does not
                // divide by zero.
                let days_passed = (now - start).num_days().max(1);
                let daily_rate = completed as f64 / days_passed as f64;
                let remaining = total_lessons.saturating_sub(completed);
                (remaining as f64 / daily_rate).ceil() as i64
            }
            _ => 0,
        };

        ProgressStats {
            total: total_lessons,
            completed,
            percentage: percentage(completed, total_lessons),
            estimated_days_remaining,
        }
    }
}

/// Rounded completion percentage, defined as 0 for an empty total.
pub fn percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    }
}
