//! studytrack CLI - lesson checklist progress tracker.

mod session;

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use studytrack_core::{LessonId, Plan, ProgressStore, Time};
use studytrack_storage::{JsonStorage, Storage};
use studytrack_ui::{sync_from_checkboxes, PageModel};
use tracing::Level;

#[derive(Parser)]
#[command(name = "studytrack")]
#[command(about = "Lesson checklist progress tracker", long_about = None)]
struct Cli {
    /// Plan document (TOML)
    #[arg(long, default_value = "plan.toml")]
    plan: PathBuf,

    /// Data directory for the snapshot and exported reports
    #[arg(long, default_value = ".studytrack")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show overall and per-phase progress
    Status,
    /// Mark lessons as completed
    Check {
        /// Lesson ids from the plan
        ids: Vec<String>,
    },
    /// Mark lessons as not completed
    Uncheck {
        /// Lesson ids from the plan
        ids: Vec<String>,
    },
    /// Export a Markdown progress report
    Export,
    /// Reset all progress (asks for confirmation)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Interactive checklist session with autosave
    Session,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    let plan_text = tokio::fs::read_to_string(&cli.plan)
        .await
        .with_context(|| format!("reading plan {}", cli.plan.display()))?;
    let plan: Plan = toml::from_str(&plan_text)
        .with_context(|| format!("parsing plan {}", cli.plan.display()))?;
    let mut page = PageModel::from_plan(&plan)?;

    let mut storage = JsonStorage::new(&cli.data_dir).await?;
    let mut store = storage.load().await?;
    page.apply_state(&store);

    match cli.command {
        Commands::Status => {
            let now = Utc::now();
            page.refresh_displays(&store, now);
            print_status(&page, &store, now);
        }
        Commands::Check { ids } => {
            set_lessons(&mut page, &ids, true);
            save_and_report(&mut store, &mut page, &mut storage).await?;
        }
        Commands::Uncheck { ids } => {
            set_lessons(&mut page, &ids, false);
            save_and_report(&mut store, &mut page, &mut storage).await?;
        }
        Commands::Export => {
            let path =
                studytrack_report::save_report(&cli.data_dir, &store, &page, Utc::now()).await?;
            println!("Report exported: {}", path.display());
        }
        Commands::Reset { yes } => {
            if yes || confirm_reset()? {
                store.reset();
                storage.clear().await?;
                page.clear_checks();
                println!("Progress reset.");
            } else {
                println!("Cancelled, nothing changed.");
            }
        }
        Commands::Session => {
            session::run(store, page, storage, cli.data_dir).await?;
        }
    }

    Ok(())
}

fn set_lessons(page: &mut PageModel, ids: &[String], checked: bool) {
    for raw in ids {
        let id = LessonId::new(raw.as_str());
        if !page.set_checked(&id, checked) {
            println!("Unknown lesson id: {}", raw);
        }
    }
}

/// One-shot mutation path: sync, persist, show the result.
async fn save_and_report(
    store: &mut ProgressStore,
    page: &mut PageModel,
    storage: &mut JsonStorage,
) -> Result<()> {
    let now = Utc::now();
    sync_from_checkboxes(store, page, now);
    storage.save(store).await?;
    page.refresh_displays(store, now);
    print_status(page, store, now);
    Ok(())
}

fn print_status(page: &PageModel, store: &ProgressStore, now: Time) {
    let summary = page.summary();
    println!("{}", page.title());
    println!(
        "  Overall: {} ({})",
        summary.percent_text, summary.counter_text
    );
    if !summary.study_days_text.is_empty() {
        println!("  Study days: {}", summary.study_days_text);
    }
    if !summary.last_update_text.is_empty() {
        println!("  Last update: {}", summary.last_update_text);
    }
    let stats = store.stats(page.lessons().len(), now);
    if stats.estimated_days_remaining > 0 {
        println!(
            "  Estimated days remaining: {}",
            stats.estimated_days_remaining
        );
    }
    for phase in page.phases() {
        println!(
            "  Phase {}: {} - {}",
            phase.number, phase.title, phase.percent_label
        );
    }
}

fn confirm_reset() -> Result<bool> {
    print!("Reset all study progress? This cannot be undone. [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
