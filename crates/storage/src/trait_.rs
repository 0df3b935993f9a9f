//! Storage trait abstraction.

use async_trait::async_trait;
use studytrack_core::ProgressStore;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable slot for the progress snapshot.
///
/// Writes are full-state overwrites under a fixed name, so concurrent
/// triggers (autosave tick, exit handler) simply last-write-win.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist the full state, replacing any previous snapshot.
    async fn save(&mut self, state: &ProgressStore) -> Result<()>;

    /// Load the snapshot.
    ///
    /// A missing slot yields the empty default state. A malformed slot
    /// is logged and also yields the default; it is never an error to
    /// the caller.
    async fn load(&self) -> Result<ProgressStore>;

    /// Remove the persisted snapshot. A missing slot is not an error.
    async fn clear(&mut self) -> Result<()>;
}
