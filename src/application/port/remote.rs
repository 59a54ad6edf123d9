// SPDX-License-Identifier: MPL-2.0
//! Remote service ports used by the viewer coordinator.
//!
//! These traits describe the favorite, trash, download and resync services
//! the gallery talks to. Their wire protocol, authentication and retry
//! behavior belong to the adapters that implement them.
//!
//! # Design Notes
//!
//! - Methods are `async` (via `async_trait`) and the returned futures are
//!   `Send`, so callers can hand them to `iced::Task::perform`
//! - Failures are reported as [`ServiceError`]; the coordinator wraps them
//!   into [`crate::error::Error::RemoteMutation`] with the operation and item

use crate::domain::gallery::Item;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// ServiceError
// =============================================================================

/// Errors reported by remote services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request did not reach the server or timed out.
    Network(String),
    /// The server refused the request.
    Rejected(String),
    /// Any other failure.
    Other(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Network(msg) => write!(f, "network error: {msg}"),
            ServiceError::Rejected(msg) => write!(f, "rejected by server: {msg}"),
            ServiceError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

// =============================================================================
// Mutation Services
// =============================================================================

/// Adds and removes items from the user's favorites.
#[async_trait]
pub trait FavoriteService: Send + Sync {
    async fn add_favorite(&self, item: &Item) -> Result<(), ServiceError>;
    async fn remove_favorite(&self, item: &Item) -> Result<(), ServiceError>;
}

/// Moves items to the trash.
#[async_trait]
pub trait TrashService: Send + Sync {
    async fn move_to_trash(&self, items: &[Item]) -> Result<(), ServiceError>;
}

/// Reconciles the local snapshot with the authoritative remote state.
///
/// Implementations are expected to clear the
/// [`UnsyncedHandle`](crate::domain::gallery::UnsyncedHandle) once the new
/// state has been ingested.
#[async_trait]
pub trait RemoteSync: Send + Sync {
    async fn resync(&self) -> Result<(), ServiceError>;
}

// =============================================================================
// Downloads
// =============================================================================

/// Progress of a single file download.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DownloadProgress {
    /// Fraction downloaded so far (0.0 to 1.0).
    Running(f32),
    Finished,
    Failed,
}

/// Receives progress updates for one file.
pub type ProgressCallback = Arc<dyn Fn(DownloadProgress) + Send + Sync>;

/// Creates per-file progress callbacks, typically backed by a progress dialog.
pub trait DownloadProgressSink: Send + Sync {
    /// Returns the callback that reports progress for the file titled `title`.
    fn for_file(&self, title: &str) -> ProgressCallback;
}

/// Saves an item to the user's device.
///
/// Implementations must report progress for one file at a time through the
/// callback they are given.
#[async_trait]
pub trait DownloadService: Send + Sync {
    async fn download(&self, item: &Item, on_progress: ProgressCallback)
        -> Result<(), ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_display() {
        assert_eq!(
            ServiceError::Network("timeout".into()).to_string(),
            "network error: timeout"
        );
        assert!(ServiceError::Rejected("quota".into())
            .to_string()
            .contains("quota"));
        assert_eq!(ServiceError::Other("boom".into()).to_string(), "boom");
    }
}
