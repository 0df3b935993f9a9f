//! Typed page model.
//!
//! Instead of looking elements up by attribute strings at every
//! operation, the plan is compiled once into handles keyed by lesson id
//! and phase number, and validated at startup: a malformed plan fails
//! loudly instead of rendering blank. A host front end mirrors handle
//! fields to real widgets; this crate never creates or destroys entries
//! after construction.

use std::collections::HashSet;

use studytrack_core::{LessonId, PhaseNumber, Plan};

/// Errors detected while compiling the plan into a page model.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Two lessons share an id
    #[error("duplicate lesson id: {0}")]
    DuplicateLesson(LessonId),

    /// Two phases share a number
    #[error("duplicate phase number: {0}")]
    DuplicatePhase(PhaseNumber),

    /// The plan has no phases at all
    #[error("plan has no phases")]
    EmptyPlan,
}

/// On-screen state of a single lesson card.
#[derive(Debug, Clone)]
pub struct LessonHandle {
    /// Stable lesson identifier
    pub id: LessonId,

    /// Lesson title as shown on the card
    pub title: String,

    /// Phase this lesson belongs to
    pub phase: PhaseNumber,

    /// Checkbox state
    pub checked: bool,

    /// Completion presentation flag (the "completed" card class)
    pub completed: bool,
}

/// On-screen state of a phase group.
#[derive(Debug, Clone)]
pub struct PhaseHandle {
    /// Phase number
    pub number: PhaseNumber,

    /// Phase title
    pub title: String,

    /// Ids of the lessons in this phase, in display order
    pub lesson_ids: Vec<LessonId>,

    /// Expanded/collapsed presentation state
    pub expanded: bool,

    /// Filled arc angle of the circular indicator, in degrees
    pub indicator_degrees: f32,

    /// Textual percentage label next to the indicator
    pub percent_label: String,
}

/// Header displays above the checklist.
#[derive(Debug, Clone, Default)]
pub struct SummaryDisplay {
    /// Overall percentage text, e.g. "40%"
    pub percent_text: String,

    /// Completed/total counter text, e.g. "4/10"
    pub counter_text: String,

    /// Elapsed study days; empty until a start date exists
    pub study_days_text: String,

    /// Last-update time; empty when the state never changed
    pub last_update_text: String,
}

/// The page: every lesson and phase handle plus the summary header.
#[derive(Debug, Clone)]
pub struct PageModel {
    pub(crate) title: String,
    pub(crate) lessons: Vec<LessonHandle>,
    pub(crate) phases: Vec<PhaseHandle>,
    pub(crate) summary: SummaryDisplay,
}

impl PageModel {
    /// Compile a plan into handles, validating identifier uniqueness.
    pub fn from_plan(plan: &Plan) -> Result<Self, PageError> {
        if plan.phases.is_empty() {
            return Err(PageError::EmptyPlan);
        }

        let mut seen_lessons = HashSet::new();
        let mut seen_phases = HashSet::new();
        let mut lessons = Vec::with_capacity(plan.total_lessons());
        let mut phases = Vec::with_capacity(plan.phases.len());

        for phase in &plan.phases {
            if !seen_phases.insert(phase.number) {
                return Err(PageError::DuplicatePhase(phase.number));
            }

            let mut lesson_ids = Vec::with_capacity(phase.lessons.len());
            for lesson in &phase.lessons {
                if !seen_lessons.insert(lesson.id.clone()) {
                    return Err(PageError::DuplicateLesson(lesson.id.clone()));
                }
                lesson_ids.push(lesson.id.clone());
                lessons.push(LessonHandle {
                    id: lesson.id.clone(),
                    title: lesson.title.clone(),
                    phase: phase.number,
                    checked: false,
                    completed: false,
                });
            }

            phases.push(PhaseHandle {
                number: phase.number,
                title: phase.title.clone(),
                lesson_ids,
                expanded: false,
                indicator_degrees: 0.0,
                percent_label: "0%".to_string(),
            });
        }

        Ok(Self {
            title: plan.title.clone(),
            lessons,
            phases,
            summary: SummaryDisplay::default(),
        })
    }

    /// Plan title, used as the page and report heading.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All lesson handles in plan order.
    pub fn lessons(&self) -> &[LessonHandle] {
        &self.lessons
    }

    /// All phase handles in plan order.
    pub fn phases(&self) -> &[PhaseHandle] {
        &self.phases
    }

    /// The summary header.
    pub fn summary(&self) -> &SummaryDisplay {
        &self.summary
    }

    /// Look up a lesson handle by id.
    pub fn lesson(&self, id: &LessonId) -> Option<&LessonHandle> {
        self.lessons.iter().find(|l| &l.id == id)
    }

    /// Case-insensitive search over lesson titles and ids, in plan
    /// order.
    pub fn find_lessons(&self, keyword: &str) -> Vec<&LessonHandle> {
        let keyword = keyword.to_lowercase();
        self.lessons
            .iter()
            .filter(|l| {
                l.title.to_lowercase().contains(&keyword)
                    || l.id.as_str().to_lowercase().contains(&keyword)
            })
            .collect()
    }

    /// Set a lesson's checkbox. Returns false when the id is unknown.
    pub fn set_checked(&mut self, id: &LessonId, checked: bool) -> bool {
        match self.lessons.iter_mut().find(|l| &l.id == id) {
            Some(lesson) => {
                lesson.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Flip a lesson's checkbox. Returns the new state, or `None` when
    /// the id is unknown.
    pub fn toggle_checked(&mut self, id: &LessonId) -> Option<bool> {
        self.lessons.iter_mut().find(|l| &l.id == id).map(|lesson| {
            lesson.checked = !lesson.checked;
            lesson.checked
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studytrack_core::{LessonDef, PhaseDef};

    fn sample_plan() -> Plan {
        Plan {
            title: "Sample Plan".to_string(),
            phases: vec![
                PhaseDef {
                    number: PhaseNumber::new(1),
                    title: "Foundations".to_string(),
                    lessons: vec![
                        LessonDef {
                            id: LessonId::new("l1"),
                            title: "Intro".to_string(),
                        },
                        LessonDef {
                            id: LessonId::new("l2"),
                            title: "Basics".to_string(),
                        },
                    ],
                },
                PhaseDef {
                    number: PhaseNumber::new(2),
                    title: "Practice".to_string(),
                    lessons: vec![LessonDef {
                        id: LessonId::new("l3"),
                        title: "Exercises".to_string(),
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_from_plan_builds_handles() {
        let page = PageModel::from_plan(&sample_plan()).unwrap();
        assert_eq!(page.lessons().len(), 3);
        assert_eq!(page.phases().len(), 2);
        assert!(page.lessons().iter().all(|l| !l.checked && !l.completed));
        assert_eq!(page.phases()[0].lesson_ids.len(), 2);
    }

    #[test]
    fn test_duplicate_lesson_id_rejected() {
        let mut plan = sample_plan();
        plan.phases[1].lessons.push(LessonDef {
            id: LessonId::new("l1"),
            title: "Copy".to_string(),
        });
        assert!(matches!(
            PageModel::from_plan(&plan),
            Err(PageError::DuplicateLesson(id)) if id == LessonId::new("l1")
        ));
    }

    #[test]
    fn test_duplicate_phase_number_rejected() {
        let mut plan = sample_plan();
        plan.phases[1].number = PhaseNumber::new(1);
        assert!(matches!(
            PageModel::from_plan(&plan),
            Err(PageError::DuplicatePhase(n)) if n == PhaseNumber::new(1)
        ));
    }

    #[test]
    fn test_empty_plan_rejected() {
        let plan = Plan {
            title: "Empty".to_string(),
            phases: vec![],
        };
        assert!(matches!(
            PageModel::from_plan(&plan),
            Err(PageError::EmptyPlan)
        ));
    }

    #[test]
    fn test_find_lessons_case_insensitive() {
        let page = PageModel::from_plan(&sample_plan()).unwrap();

        let hits = page.find_lessons("BAS");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, LessonId::new("l2"));

        // Ids match too, and misses are empty rather than an error.
        assert_eq!(page.find_lessons("l3").len(), 1);
        assert!(page.find_lessons("quantum").is_empty());
    }

    #[test]
    fn test_set_checked_unknown_id() {
        let mut page = PageModel::from_plan(&sample_plan()).unwrap();
        assert!(!page.set_checked(&LessonId::new("ghost"), true));
        assert!(page.set_checked(&LessonId::new("l1"), true));
        assert!(page.lesson(&LessonId::new("l1")).unwrap().checked);
    }
}
