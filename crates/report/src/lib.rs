//! Progress report generation.
//!
//! Serializes the current progress state into a Markdown document and
//! writes it to a date-stamped file (the "download" of the browser
//! original).

#![warn(missing_docs)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use studytrack_core::{percentage, ProgressStore, Time};
use studytrack_ui::PageModel;
use tokio::fs;
use tracing::info;

/// Errors that can occur while exporting a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// I/O error while writing the report file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// File name prefix of exported reports.
pub const REPORT_PREFIX: &str = "study-progress-report";

/// Build the Markdown report for the current state.
///
/// Sections: generation timestamp, overall numbers, a study-days block
/// (only when a start date exists), one block per phase, and a
/// checklist of completed lesson titles in completion order.
pub fn build_report(store: &ProgressStore, page: &PageModel, now: Time) -> String {
    let total = page.lessons().len();
    let stats = store.stats(total, now);

    let mut report = String::new();
    // String formatting is infallible; the Write results are discarded.
    let _ = writeln!(report, "# {} - Progress Report", page.title());
    let _ = writeln!(report);
    let _ = writeln!(report, "Generated: {}", now.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(report);
    let _ = writeln!(report, "## Overall");
    let _ = writeln!(
        report,
        "- Lessons completed: {}/{}",
        stats.completed, stats.total
    );
    let _ = writeln!(report, "- Completion: {}%", stats.percentage);

    if let Some(start) = store.start_date() {
        let days = store.study_days(now).unwrap_or(0);
        let _ = writeln!(report, "- Study days: {}", days);
        let _ = writeln!(report, "- Started: {}", start.format("%Y-%m-%d"));
    }

    let _ = writeln!(report);
    let _ = writeln!(report, "## Phases");
    let _ = writeln!(report);
    for phase in page.phases() {
        let completed = phase
            .lesson_ids
            .iter()
            .filter(|id| store.is_completed(id))
            .count();
        let pct = percentage(completed, phase.lesson_ids.len());
        let _ = writeln!(report, "### {}", phase.title);
        let _ = writeln!(
            report,
            "- Completed: {}/{} ({}%)",
            completed,
            phase.lesson_ids.len(),
            pct
        );
        let _ = writeln!(report);
    }

    let _ = writeln!(report, "## Completed Lessons");
    let _ = writeln!(report);
    for id in store.completed() {
        if let Some(lesson) = page.lesson(id) {
            let _ = writeln!(report, "- [x] {}", lesson.title);
        }
    }

    report
}

/// File name for a report generated at the given time, embedding the
/// ISO date portion only.
pub fn report_filename(now: Time) -> String {
    format!("{}_{}.md", REPORT_PREFIX, now.date_naive())
}

/// Build the report and write it into the given directory.
pub async fn save_report(
    dir: impl AsRef<Path>,
    store: &ProgressStore,
    page: &PageModel,
    now: Time,
) -> Result<PathBuf, ReportError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).await?;

    let path = dir.join(report_filename(now));
    fs::write(&path, build_report(store, page, now)).await?;
    info!(path = %path.display(), "report exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use studytrack_core::{LessonDef, LessonId, PhaseDef, PhaseNumber, Plan};
    use studytrack_ui::sync_from_checkboxes;

    fn plan() -> Plan {
        Plan {
            title: "AI Study Plan".to_string(),
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
    fn test_report_sections() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 9, 30, 0).unwrap();

        let mut page = PageModel::from_plan(&plan()).unwrap();
        let mut store = ProgressStore::new();
        page.set_checked(&LessonId::new("l2"), true);
        page.set_checked(&LessonId::new("l3"), true);
        sync_from_checkboxes(&mut store, &mut page, start);

        let report = build_report(&store, &page, now);
        assert!(report.starts_with("# AI Study Plan - Progress Report"));
        assert!(report.contains("Generated: 2024-01-11 09:30:00"));
        assert!(report.contains("- Lessons completed: 2/3"));
        assert!(report.contains("- Completion: 67%"));
        assert!(report.contains("- Study days: 10"));
        assert!(report.contains("- Started: 2024-01-01"));
        assert!(report.contains("### Foundations"));
        assert!(report.contains("- Completed: 1/2 (50%)"));
        assert!(report.contains("### Practice"));
        assert!(report.contains("- Completed: 1/1 (100%)"));
        assert!(report.contains("- [x] Basics"));
        assert!(report.contains("- [x] Exercises"));
        assert!(!report.contains("- [x] Intro"));
    }

    #[test]
    fn test_report_omits_days_without_start_date() {
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
        let page = PageModel::from_plan(&plan()).unwrap();
        let store = ProgressStore::new();

        let report = build_report(&store, &page, now);
        assert!(report.contains("- Lessons completed: 0/3"));
        assert!(!report.contains("Study days"));
        assert!(!report.contains("Started:"));
    }

    #[test]
    fn test_report_skips_stale_completed_ids() {
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
        let page = PageModel::from_plan(&plan()).unwrap();
        let store = ProgressStore::from_parts(
            vec![LessonId::new("ghost"), LessonId::new("l1")],
            Some(now),
            Some(now),
        );

        let report = build_report(&store, &page, now);
        assert!(report.contains("- [x] Intro"));
        assert!(!report.contains("ghost"));
    }

    #[test]
    fn test_report_filename_embeds_iso_date() {
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 23, 59, 0).unwrap();
        assert_eq!(
            report_filename(now),
            "study-progress-report_2024-01-11.md"
        );
    }

    #[tokio::test]
    async fn test_save_report_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
        let page = PageModel::from_plan(&plan()).unwrap();
        let store = ProgressStore::new();

        let path = save_report(dir.path(), &store, &page, now).await.unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "study-progress-report_2024-01-11.md"
        );
        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(contents.contains("## Overall"));
    }
}
