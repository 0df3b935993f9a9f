//! Plan document model - the checklist the host page renders.
//!
//! The plan is external input (authored alongside the page, typically as
//! TOML); the progress store never creates or destroys its entries, it
//! only records which lesson ids are completed.

use serde::{Deserialize, Serialize};

use crate::id::{LessonId, PhaseNumber};

/// A study plan: ordered phases, each an ordered group of lessons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Plan title, used as the report heading
    pub title: String,

    /// Ordered phases
    #[serde(rename = "phase")]
    pub phases: Vec<PhaseDef>,
}

/// A phase: an ordered group of lessons sharing a progress indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseDef {
    /// Phase number, unique within the plan
    pub number: PhaseNumber,

    /// Phase title
    pub title: String,

    /// Lessons in this phase, in display order
    #[serde(rename = "lesson")]
    pub lessons: Vec<LessonDef>,
}

/// A single checklist item with a stable identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonDef {
    /// Stable lesson id, unique within the plan
    pub id: LessonId,

    /// Lesson title
    pub title: String,
}

impl Plan {
    /// Total number of lessons across all phases.
    pub fn total_lessons(&self) -> usize {
        self.phases.iter().map(|p| p.lessons.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_parses_from_toml() {
        let doc = r#"
            title = "AI Study Plan"

            [[phase]]
            number = 1
            title = "Foundations"

            [[phase.lesson]]
            id = "l1"
            title = "Intro"

            [[phase.lesson]]
            id = "l2"
            title = "Basics"

            [[phase]]
            number = 2
            title = "Practice"

            [[phase.lesson]]
            id = "l3"
            title = "Exercises"
        "#;

        let plan: Plan = toml::from_str(doc).unwrap();
        assert_eq!(plan.title, "AI Study Plan");
        assert_eq!(plan.phases.len(), 2);
        assert_eq!(plan.total_lessons(), 3);
        assert_eq!(plan.phases[0].number, PhaseNumber::new(1));
        assert_eq!(plan.phases[0].lessons[1].id, LessonId::new("l2"));
    }

    #[test]
    fn test_total_lessons_empty() {
        let plan = Plan {
            title: "Empty".to_string(),
            phases: vec![],
        };
        assert_eq!(plan.total_lessons(), 0);
    }
}
