// SPDX-License-Identifier: MPL-2.0
//! Minimal in-memory services for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use gallery_frame::application::port::{
    DownloadProgress, DownloadProgressSink, DownloadService, EditedImage, FavoriteService,
    ProgressCallback, RemoteSync, ServiceError, TrashService, UploadPipeline,
    ViewerVisibilityObserver,
};
use gallery_frame::domain::gallery::{CollectionId, Item, ItemId, UnsyncedHandle, UserId};
use gallery_frame::ui::viewer::ViewerServices;
use tokio::sync::oneshot;

pub const OWNER: UserId = UserId(7);
pub const ALBUM: CollectionId = CollectionId(42);

/// `A` today, `B` yesterday, `C` three days ago.
pub fn abc() -> Vec<Item> {
    let now = Utc::now();
    ["A", "B", "C"]
        .iter()
        .zip([0, 1, 3])
        .enumerate()
        .map(|(i, (title, days))| {
            Item::new(
                ItemId::new(i as i64 + 1),
                OWNER,
                ALBUM,
                now - Duration::days(days),
                *title,
            )
        })
        .collect()
}

#[derive(Default)]
pub struct Remote {
    pub favorites: Mutex<Vec<(ItemId, bool)>>,
    pub trashed: Mutex<Vec<ItemId>>,
    trash_gate: Mutex<Option<oneshot::Receiver<()>>>,
    pub downloads: Mutex<Vec<ItemId>>,
    pub uploads: Mutex<Vec<String>>,
    pub visibility: Mutex<Vec<bool>>,
    pub resyncs: Mutex<usize>,
}

impl Remote {
    /// Keeps the next trash call pending until the sender fires.
    pub fn hold_trash(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.trash_gate.lock().unwrap() = Some(rx);
        tx
    }
}

#[async_trait]
impl FavoriteService for Remote {
    async fn add_favorite(&self, item: &Item) -> Result<(), ServiceError> {
        self.favorites.lock().unwrap().push((item.id(), true));
        Ok(())
    }

    async fn remove_favorite(&self, item: &Item) -> Result<(), ServiceError> {
        self.favorites.lock().unwrap().push((item.id(), false));
        Ok(())
    }
}

#[async_trait]
impl TrashService for Remote {
    async fn move_to_trash(&self, items: &[Item]) -> Result<(), ServiceError> {
        let gate = self.trash_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.await
                .map_err(|_| ServiceError::Network("gate dropped".to_string()))?;
        }
        self.trashed
            .lock()
            .unwrap()
            .extend(items.iter().map(Item::id));
        Ok(())
    }
}

#[async_trait]
impl DownloadService for Remote {
    async fn download(&self, item: &Item, on_progress: ProgressCallback) -> Result<(), ServiceError> {
        self.downloads.lock().unwrap().push(item.id());
        on_progress(DownloadProgress::Finished);
        Ok(())
    }
}

impl DownloadProgressSink for Remote {
    fn for_file(&self, _title: &str) -> ProgressCallback {
        Arc::new(|_| {})
    }
}

impl UploadPipeline for Remote {
    fn prepare_session(&self) {}

    fn show_progress(&self) {}

    fn enqueue(&self, edited: EditedImage, collection: CollectionId, _original: Item) {
        self.uploads
            .lock()
            .unwrap()
            .push(format!("{}@{}", edited.file_name(), collection.0));
    }
}

#[async_trait]
impl RemoteSync for Remote {
    async fn resync(&self) -> Result<(), ServiceError> {
        *self.resyncs.lock().unwrap() += 1;
        Ok(())
    }
}

impl ViewerVisibilityObserver for Remote {
    fn viewer_visibility_changed(&self, open: bool) {
        self.visibility.lock().unwrap().push(open);
    }
}

/// Wires one [`Remote`] behind every service port.
pub fn services(remote: &Arc<Remote>) -> ViewerServices {
    ViewerServices {
        favorites: remote.clone(),
        trash: remote.clone(),
        downloads: remote.clone(),
        download_progress: remote.clone(),
        uploads: remote.clone(),
        sync: remote.clone(),
        visibility: remote.clone(),
    }
}

pub fn setup() -> (Arc<Remote>, UnsyncedHandle) {
    (Arc::new(Remote::default()), UnsyncedHandle::new())
}
