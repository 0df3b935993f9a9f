//! Bidirectional reconciliation between store and page.
//!
//! Load direction: a persisted state is mirrored onto checkboxes and
//! card flags. Interaction direction: checkbox states are fed back into
//! the store and the derived displays are recomputed.

use studytrack_core::{percentage, LessonId, PhaseNumber, ProgressStore, Time};
use tracing::debug;

use crate::page::PageModel;

impl PageModel {
    /// Mirror a loaded state onto the page: check and mark every lesson
    /// whose id is in the completed set. Ids with no matching handle
    /// are skipped; a stale snapshot from an older plan must not fail.
    pub fn apply_state(&mut self, store: &ProgressStore) {
        for id in store.completed() {
            match self.lessons.iter_mut().find(|l| &l.id == id) {
                Some(lesson) => {
                    lesson.checked = true;
                    lesson.completed = true;
                }
                None => debug!(%id, "persisted lesson id has no handle, skipping"),
            }
        }
    }

    /// Recompute the summary header and all phase displays.
    pub fn refresh_displays(&mut self, store: &ProgressStore, now: Time) {
        let total = self.lessons.len();
        let completed = store.completed_count();

        self.summary.percent_text = format!("{}%", percentage(completed, total));
        self.summary.counter_text = format!("{}/{}", completed, total);
        self.summary.study_days_text = store
            .study_days(now)
            .map(|d| d.to_string())
            .unwrap_or_default();
        self.summary.last_update_text = store
            .last_update()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        self.refresh_phase_displays(store);
    }

    /// Recompute each phase's circular indicator and percentage label.
    pub fn refresh_phase_displays(&mut self, store: &ProgressStore) {
        for phase in &mut self.phases {
            let completed = phase
                .lesson_ids
                .iter()
                .filter(|id| store.is_completed(id))
                .count();
            let pct = percentage(completed, phase.lesson_ids.len());

            phase.indicator_degrees = (pct as f32 / 100.0) * 360.0;
            phase.percent_label = format!("{}%", pct);
        }
    }

    /// Flip one phase between expanded and collapsed. Returns false
    /// when the number is unknown.
    pub fn toggle_phase(&mut self, number: PhaseNumber) -> bool {
        match self.phases.iter_mut().find(|p| p.number == number) {
            Some(phase) => {
                phase.expanded = !phase.expanded;
                true
            }
            None => false,
        }
    }

    /// Expand or collapse every phase. The direction follows the first
    /// phase's current state: expand all if it is collapsed, collapse
    /// all otherwise.
    pub fn toggle_all_phases(&mut self) {
        let expand = match self.phases.first() {
            Some(first) => !first.expanded,
            None => return,
        };
        for phase in &mut self.phases {
            phase.expanded = expand;
        }
    }

    /// Uncheck every lesson and drop every completion flag (the UI side
    /// of a reset).
    pub fn clear_checks(&mut self) {
        for lesson in &mut self.lessons {
            lesson.checked = false;
            lesson.completed = false;
        }
    }

    fn checked_ids(&self) -> Vec<LessonId> {
        self.lessons
            .iter()
            .filter(|l| l.checked)
            .map(|l| l.id.clone())
            .collect()
    }
}

/// Full sync operation, the checkbox-change handler: rebuild the store's
/// completed set from the current checkbox states, then mirror each
/// card's completion flag back from the store.
pub fn sync_from_checkboxes(store: &mut ProgressStore, page: &mut PageModel, now: Time) {
    store.sync_checked(page.checked_ids(), now);
    for lesson in &mut page.lessons {
        lesson.completed = store.is_completed(&lesson.id);
    }
}
