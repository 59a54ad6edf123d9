// SPDX-License-Identifier: MPL-2.0
//! Upload pipeline port for saving edited copies.
//!
//! The pipeline is fire-and-forget from the gallery's point of view: it is
//! told to prepare a session, show its progress dialog and enqueue the file.
//! Re-encoding, encryption and the upload itself happen behind this trait.

use crate::domain::gallery::{CollectionId, Item};
use std::fmt;
use std::sync::Arc;

/// Encoded bytes of an image produced by the in-viewer editor.
#[derive(Clone, PartialEq, Eq)]
pub struct EditedImage {
    file_name: String,
    data: Arc<Vec<u8>>,
}

impl EditedImage {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data: Arc::new(data),
        }
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for EditedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditedImage")
            .field("file_name", &self.file_name)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Port for the upload manager.
pub trait UploadPipeline: Send + Sync {
    /// Resets per-session state before a new upload.
    fn prepare_session(&self);

    /// Makes the upload progress dialog visible.
    fn show_progress(&self);

    /// Queues `edited` for upload into `collection` as a copy of `original`.
    fn enqueue(&self, edited: EditedImage, collection: CollectionId, original: Item);
}
