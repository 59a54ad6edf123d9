// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines the interfaces of the collaborators the gallery core
//! talks to but does not implement.
//!
//! # Available Ports
//!
//! - [`remote`]: Favorite, trash, download and resync services
//! - [`upload`]: Upload pipeline for edited copies
//! - [`keyboard`]: Modifier key notifications
//! - [`host`]: Host observers (viewer visibility)
//!
//! # Design Notes
//!
//! - All traits use domain types only (no Iced handles)
//! - Traits are `Send + Sync` so services can be shared with Iced tasks

pub mod host;
pub mod keyboard;
pub mod remote;
pub mod upload;

pub use host::{IgnoreVisibility, ViewerVisibilityObserver};
pub use keyboard::{KeyEvent, KeyEventHub, KeyEventSource, KeyListener, ListenerId, ModifierKey};
pub use remote::{
    DownloadProgress, DownloadProgressSink, DownloadService, FavoriteService, ProgressCallback,
    RemoteSync, ServiceError, TrashService,
};
pub use upload::{EditedImage, UploadPipeline};
