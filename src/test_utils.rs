// SPDX-License-Identifier: MPL-2.0
//! Recording fakes of the remote services, shared by unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::application::port::{
    DownloadProgress, DownloadProgressSink, DownloadService, EditedImage, FavoriteService,
    ProgressCallback, RemoteSync, ServiceError, TrashService, UploadPipeline,
    ViewerVisibilityObserver,
};
use crate::domain::gallery::{CollectionId, Item, ItemId, UnsyncedHandle};
use crate::ui::viewer::ViewerServices;

fn take_failure(flag: &AtomicBool) -> Result<(), ServiceError> {
    if flag.swap(false, Ordering::SeqCst) {
        Err(ServiceError::Rejected("injected failure".to_string()))
    } else {
        Ok(())
    }
}

/// Records `(item, favorite_after_call)` pairs.
#[derive(Default)]
pub struct FakeFavorites {
    calls: Mutex<Vec<(ItemId, bool)>>,
    fail: AtomicBool,
}

impl FakeFavorites {
    pub fn calls(&self) -> Vec<(ItemId, bool)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl FavoriteService for FakeFavorites {
    async fn add_favorite(&self, item: &Item) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push((item.id(), true));
        take_failure(&self.fail)
    }

    async fn remove_favorite(&self, item: &Item) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push((item.id(), false));
        take_failure(&self.fail)
    }
}

/// Records trashed ids; [`FakeTrash::hold`] keeps the next call pending.
#[derive(Default)]
pub struct FakeTrash {
    calls: Mutex<Vec<Vec<ItemId>>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    fail: AtomicBool,
}

impl FakeTrash {
    pub fn calls(&self) -> Vec<Vec<ItemId>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    /// Blocks the next call until the returned sender fires.
    pub fn hold(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(rx);
        tx
    }
}

#[async_trait]
impl TrashService for FakeTrash {
    async fn move_to_trash(&self, items: &[Item]) -> Result<(), ServiceError> {
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.await
                .map_err(|_| ServiceError::Network("gate dropped".to_string()))?;
        }
        self.calls
            .lock()
            .unwrap()
            .push(items.iter().map(Item::id).collect());
        take_failure(&self.fail)
    }
}

/// Reports half progress, then completion.
#[derive(Default)]
pub struct FakeDownloads {
    calls: Mutex<Vec<ItemId>>,
    fail: AtomicBool,
}

impl FakeDownloads {
    pub fn calls(&self) -> Vec<ItemId> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl DownloadService for FakeDownloads {
    async fn download(
        &self,
        item: &Item,
        on_progress: ProgressCallback,
    ) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push(item.id());
        on_progress(DownloadProgress::Running(0.5));
        match take_failure(&self.fail) {
            Ok(()) => {
                on_progress(DownloadProgress::Finished);
                Ok(())
            }
            Err(err) => {
                on_progress(DownloadProgress::Failed);
                Err(err)
            }
        }
    }
}

#[derive(Default)]
pub struct FakeProgress {
    titles: Mutex<Vec<String>>,
    updates: Arc<Mutex<Vec<DownloadProgress>>>,
}

impl FakeProgress {
    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<DownloadProgress> {
        self.updates.lock().unwrap().clone()
    }
}

impl DownloadProgressSink for FakeProgress {
    fn for_file(&self, title: &str) -> ProgressCallback {
        self.titles.lock().unwrap().push(title.to_string());
        let updates = Arc::clone(&self.updates);
        Arc::new(move |progress| updates.lock().unwrap().push(progress))
    }
}

/// Records pipeline calls as short strings.
#[derive(Default)]
pub struct FakeUploads {
    events: Mutex<Vec<String>>,
}

impl FakeUploads {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl UploadPipeline for FakeUploads {
    fn prepare_session(&self) {
        self.events.lock().unwrap().push("prepare".to_string());
    }

    fn show_progress(&self) {
        self.events.lock().unwrap().push("progress".to_string());
    }

    fn enqueue(&self, edited: EditedImage, collection: CollectionId, original: Item) {
        self.events.lock().unwrap().push(format!(
            "enqueue {} into {} from {}",
            edited.file_name(),
            collection.0,
            original.id()
        ));
    }
}

/// Counts resyncs and clears the unsynced state on success.
pub struct FakeSync {
    calls: AtomicUsize,
    fail: AtomicBool,
    unsynced: UnsyncedHandle,
}

impl FakeSync {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl RemoteSync for FakeSync {
    async fn resync(&self) -> Result<(), ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        take_failure(&self.fail)?;
        self.unsynced.clear();
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeVisibility {
    events: Mutex<Vec<bool>>,
}

impl FakeVisibility {
    pub fn events(&self) -> Vec<bool> {
        self.events.lock().unwrap().clone()
    }
}

impl ViewerVisibilityObserver for FakeVisibility {
    fn viewer_visibility_changed(&self, open: bool) {
        self.events.lock().unwrap().push(open);
    }
}

/// One fake of every collaborator, sharing one unsynced handle.
pub struct Fakes {
    pub favorites: Arc<FakeFavorites>,
    pub trash: Arc<FakeTrash>,
    pub downloads: Arc<FakeDownloads>,
    pub progress: Arc<FakeProgress>,
    pub uploads: Arc<FakeUploads>,
    pub sync: Arc<FakeSync>,
    pub visibility: Arc<FakeVisibility>,
    pub unsynced: UnsyncedHandle,
}

impl Fakes {
    pub fn new() -> Self {
        let unsynced = UnsyncedHandle::new();
        Self {
            favorites: Arc::default(),
            trash: Arc::default(),
            downloads: Arc::default(),
            progress: Arc::default(),
            uploads: Arc::default(),
            sync: Arc::new(FakeSync {
                calls: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
                unsynced: unsynced.clone(),
            }),
            visibility: Arc::default(),
            unsynced,
        }
    }

    pub fn services(&self) -> ViewerServices {
        ViewerServices {
            favorites: self.favorites.clone(),
            trash: self.trash.clone(),
            downloads: self.downloads.clone(),
            download_progress: self.progress.clone(),
            uploads: self.uploads.clone(),
            sync: self.sync.clone(),
            visibility: self.visibility.clone(),
        }
    }
}
