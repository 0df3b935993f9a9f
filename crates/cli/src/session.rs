//! Interactive checklist session.
//!
//! The session is the browser-page analog: a single-task event loop
//! over stdin commands, a periodic autosave tick, and Ctrl-C as the
//! save-on-exit path. Everything runs to completion on one task, so
//! writes never race; the snapshot is a full-state overwrite either way.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use studytrack_core::{LessonId, PhaseNumber, ProgressStore};
use studytrack_storage::{JsonStorage, Storage};
use studytrack_ui::{sync_from_checkboxes, PageModel};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Duration};
use tracing::debug;

const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

/// Run the interactive session until quit, EOF or Ctrl-C.
pub async fn run(
    mut store: ProgressStore,
    mut page: PageModel,
    mut storage: JsonStorage,
    report_dir: PathBuf,
) -> Result<()> {
    // Start like the page does: first phase expanded.
    if let Some(first) = page.phases().first().map(|p| p.number) {
        page.toggle_phase(first);
    }
    page.refresh_displays(&store, Utc::now());
    render(&page);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut autosave = interval(AUTOSAVE_INTERVAL);
    // The first tick completes immediately; consume it so saves start
    // one full interval in.
    autosave.tick().await;

    loop {
        tokio::select! {
            _ = autosave.tick() => {
                autosave_tick(&store, &mut storage).await?;
            }
            _ = tokio::signal::ctrl_c() => {
                storage.save(&store).await?;
                println!();
                break;
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !handle_command(
                            line.trim(),
                            &mut store,
                            &mut page,
                            &mut storage,
                            &report_dir,
                        )
                        .await?
                        {
                            storage.save(&store).await?;
                            break;
                        }
                    }
                    None => {
                        storage.save(&store).await?;
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Autosave predicate: the timer only persists when at least one
/// lesson is completed, like the original page. An emptied set
/// therefore never reaches disk on the timer path; only explicit save
/// or exit commits it.
fn should_autosave(store: &ProgressStore) -> bool {
    store.completed_count() > 0
}

/// One autosave timer tick. Returns whether a snapshot was written.
async fn autosave_tick(
    store: &ProgressStore,
    storage: &mut JsonStorage,
) -> studytrack_storage::Result<bool> {
    if !should_autosave(store) {
        return Ok(false);
    }
    storage.save(store).await?;
    debug!("autosaved");
    Ok(true)
}

/// Handle one command line. Returns false when the session should end.
async fn handle_command(
    line: &str,
    store: &mut ProgressStore,
    page: &mut PageModel,
    storage: &mut JsonStorage,
    report_dir: &Path,
) -> Result<bool> {
    let mut words = line.split_whitespace();
    let command = match words.next() {
        Some(word) => word,
        None => return Ok(true),
    };
    let arg = words.next();

    match (command, arg) {
        ("q", _) | ("quit", _) => return Ok(false),
        ("h", _) | ("help", _) => print_help(),
        ("status", _) => render(page),
        // The Ctrl-S analog: explicit save with feedback.
        ("s", _) | ("save", _) => {
            storage.save(store).await?;
            println!("Progress saved.");
        }
        // The Ctrl-E analog: report export.
        ("e", _) | ("export", _) => {
            let path =
                studytrack_report::save_report(report_dir, store, page, Utc::now()).await?;
            println!("Report exported: {}", path.display());
        }
        ("a", _) | ("all", _) => {
            page.toggle_all_phases();
            render(page);
        }
        ("f", Some(raw)) | ("find", Some(raw)) => {
            let matches = page.find_lessons(raw);
            if matches.is_empty() {
                println!("No lessons match '{}'.", raw);
            }
            for lesson in matches {
                let mark = if lesson.checked { "x" } else { " " };
                println!("  [{}] {}  {}", mark, lesson.id, lesson.title);
            }
        }
        ("p", Some(raw)) | ("phase", Some(raw)) => match raw.parse::<u32>() {
            Ok(n) => {
                if !page.toggle_phase(PhaseNumber::new(n)) {
                    println!("Unknown phase: {}", n);
                }
                render(page);
            }
            Err(_) => println!("Phase must be a number."),
        },
        ("t", Some(raw)) | ("toggle", Some(raw)) => {
            let id = LessonId::new(raw);
            if page.toggle_checked(&id).is_none() {
                println!("Unknown lesson id: {}", raw);
            }
            apply_checkbox_change(store, page, storage).await?;
        }
        ("c", Some(raw)) | ("check", Some(raw)) => {
            if !page.set_checked(&LessonId::new(raw), true) {
                println!("Unknown lesson id: {}", raw);
            }
            apply_checkbox_change(store, page, storage).await?;
        }
        ("u", Some(raw)) | ("uncheck", Some(raw)) => {
            if !page.set_checked(&LessonId::new(raw), false) {
                println!("Unknown lesson id: {}", raw);
            }
            apply_checkbox_change(store, page, storage).await?;
        }
        _ => println!("Unknown command; 'h' for help."),
    }

    Ok(true)
}

/// The checkbox-change handler: resync, refresh, persist, re-render.
async fn apply_checkbox_change(
    store: &mut ProgressStore,
    page: &mut PageModel,
    storage: &mut JsonStorage,
) -> Result<()> {
    let now = Utc::now();
    sync_from_checkboxes(store, page, now);
    page.refresh_displays(store, now);
    storage.save(store).await?;
    render(page);
    Ok(())
}

fn render(page: &PageModel) {
    let summary = page.summary();
    println!();
    println!("{}", page.title());
    let mut line = format!(
        "  Overall {} ({})",
        summary.percent_text, summary.counter_text
    );
    if !summary.study_days_text.is_empty() {
        line.push_str(&format!(", day {}", summary.study_days_text));
    }
    println!("{}", line);

    for phase in page.phases() {
        let marker = if phase.expanded { "-" } else { "+" };
        println!(
            "  {} Phase {}: {} [{}]",
            marker, phase.number, phase.title, phase.percent_label
        );
        if phase.expanded {
            for id in &phase.lesson_ids {
                if let Some(lesson) = page.lesson(id) {
                    let mark = if lesson.checked { "x" } else { " " };
                    println!("      [{}] {}  {}", mark, lesson.id, lesson.title);
                }
            }
        }
    }
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  t <id>      toggle a lesson checkbox (also: c/check, u/uncheck)");
    println!("  p <n>       expand/collapse phase n");
    println!("  f <word>    find lessons by title or id");
    println!("  a           expand/collapse all phases");
    println!("  s           save progress now");
    println!("  e           export a Markdown report");
    println!("  status      redraw the checklist");
    println!("  q           save and quit (Ctrl-C also saves)");
}
