//! Renderer/sync engine for studytrack.
//!
//! The host page is compiled once into a typed page model of lesson and
//! phase handles; this crate keeps those handles and the progress store
//! mutually consistent in both directions and recomputes the derived
//! displays (percentages, day counts, circular indicators).

#![warn(missing_docs)]

pub mod page;
pub mod sync;

pub use page::{LessonHandle, PageError, PageModel, PhaseHandle, SummaryDisplay};
pub use sync::sync_from_checkboxes;
