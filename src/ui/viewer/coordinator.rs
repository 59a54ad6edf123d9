// SPDX-License-Identifier: MPL-2.0
//! Full-screen viewer coordination.
//!
//! The coordinator owns whether the viewer is open and which tile it shows,
//! and relays the viewer's mutation requests to the remote services. A
//! favorite or delete is written to the shared [`UnsyncedHandle`] only after
//! the service acknowledged it, so the grid never shows a change the server
//! rejected.
//!
//! Mutation methods return `'static` futures owning clones of what they
//! need. Closing the viewer, or dropping the coordinator, does not cancel a
//! mutation that was already dispatched.

use std::future::Future;
use std::sync::Arc;

use crate::application::port::{
    DownloadProgressSink, DownloadService, EditedImage, FavoriteService, RemoteSync, TrashService,
    UploadPipeline, ViewerVisibilityObserver,
};
use crate::config::CapabilitiesConfig;
use crate::domain::gallery::{CollectionId, Item, ItemId, UnsyncedHandle};
use crate::error::{Error, Operation, Result};

/// Whether the viewer is showing, and at which window index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerState {
    #[default]
    Closed,
    Open {
        index: usize,
    },
}

/// Viewer operations the host enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub favorite: bool,
    pub delete: bool,
    pub download: bool,
    /// Saving an edited copy through the upload pipeline.
    pub edit: bool,
}

impl Capabilities {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            favorite: true,
            delete: true,
            download: true,
            edit: true,
        }
    }

    #[must_use]
    pub const fn none() -> Self {
        Self {
            favorite: false,
            delete: false,
            download: false,
            edit: false,
        }
    }

    /// Returns whether `operation` may be requested.
    #[must_use]
    pub fn allows(&self, operation: Operation) -> bool {
        match operation {
            Operation::Favorite => self.favorite,
            Operation::Delete => self.delete,
            Operation::Download => self.download,
            Operation::Upload => self.edit,
        }
    }

    fn require(&self, operation: Operation) -> Result<()> {
        if self.allows(operation) {
            Ok(())
        } else {
            Err(Error::CapabilityDisabled(operation))
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

impl From<&CapabilitiesConfig> for Capabilities {
    fn from(config: &CapabilitiesConfig) -> Self {
        Self {
            favorite: config.favorite.unwrap_or(true),
            delete: config.delete.unwrap_or(true),
            download: config.download.unwrap_or(true),
            edit: config.edit.unwrap_or(true),
        }
    }
}

/// Collaborators the coordinator relays to.
#[derive(Clone)]
pub struct ViewerServices {
    pub favorites: Arc<dyn FavoriteService>,
    pub trash: Arc<dyn TrashService>,
    pub downloads: Arc<dyn DownloadService>,
    pub download_progress: Arc<dyn DownloadProgressSink>,
    pub uploads: Arc<dyn UploadPipeline>,
    pub sync: Arc<dyn RemoteSync>,
    pub visibility: Arc<dyn ViewerVisibilityObserver>,
}

impl std::fmt::Debug for ViewerServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewerServices").finish_non_exhaustive()
    }
}

/// Open/closed state of the viewer plus the mutation relay.
#[derive(Debug)]
pub struct ViewerCoordinator {
    state: ViewerState,
    capabilities: Capabilities,
    services: ViewerServices,
    unsynced: UnsyncedHandle,
}

impl ViewerCoordinator {
    #[must_use]
    pub fn new(
        services: ViewerServices,
        capabilities: Capabilities,
        unsynced: UnsyncedHandle,
    ) -> Self {
        Self {
            state: ViewerState::Closed,
            capabilities,
            services,
            unsynced,
        }
    }

    #[must_use]
    pub fn state(&self) -> ViewerState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open { .. })
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            ViewerState::Open { index } => Some(index),
            ViewerState::Closed => None,
        }
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Replaces the enabled operations, e.g. when browsing into the trash.
    pub fn set_capabilities(&mut self, capabilities: Capabilities) {
        self.capabilities = capabilities;
    }

    #[must_use]
    pub fn unsynced(&self) -> &UnsyncedHandle {
        &self.unsynced
    }

    /// Shows the tile at `index`. Already open means an index change.
    pub fn open(&mut self, index: usize) {
        match self.state {
            ViewerState::Closed => {
                self.state = ViewerState::Open { index };
                self.services.visibility.viewer_visibility_changed(true);
            }
            ViewerState::Open { .. } => self.navigate(index),
        }
    }

    /// Records in-viewer navigation. Ignored while closed.
    pub fn navigate(&mut self, index: usize) {
        if let ViewerState::Open { index: current } = &mut self.state {
            *current = index;
        } else {
            tracing::debug!(index, "navigation while viewer is closed ignored");
        }
    }

    pub fn close(&mut self) {
        if self.is_open() {
            self.state = ViewerState::Closed;
            self.services.visibility.viewer_visibility_changed(false);
        }
    }

    /// Flips the favorite flag of `item` remotely, then records the new value.
    ///
    /// Resolves to the new favorite status.
    pub fn toggle_favorite(&self, item: &Item) -> impl Future<Output = Result<bool>> + Send + 'static {
        let allowed = self.capabilities.require(Operation::Favorite);
        let favorites = Arc::clone(&self.services.favorites);
        let unsynced = self.unsynced.clone();
        let item = item.clone();

        async move {
            allowed?;
            let was_favorite = unsynced.favorite_status(&item);
            let outcome = if was_favorite {
                favorites.remove_favorite(&item).await
            } else {
                favorites.add_favorite(&item).await
            };
            outcome.map_err(|err| Error::remote(Operation::Favorite, item.id(), err))?;

            unsynced.mark_favorite(item.id(), !was_favorite);
            tracing::info!(item = %item.id(), favorite = !was_favorite, "favorite updated");
            Ok(!was_favorite)
        }
    }

    /// Moves `item` to the trash remotely, then marks it temporarily deleted.
    ///
    /// Resolves to the id of the deleted item.
    pub fn delete_item(&self, item: &Item) -> impl Future<Output = Result<ItemId>> + Send + 'static {
        let allowed = self.capabilities.require(Operation::Delete);
        let trash = Arc::clone(&self.services.trash);
        let unsynced = self.unsynced.clone();
        let item = item.clone();

        async move {
            allowed?;
            trash
                .move_to_trash(std::slice::from_ref(&item))
                .await
                .map_err(|err| Error::remote(Operation::Delete, item.id(), err))?;

            unsynced.mark_temp_deleted(item.id());
            tracing::info!(item = %item.id(), "moved to trash");
            Ok(item.id())
        }
    }

    /// Downloads `item`, reporting progress under its title.
    pub fn download_item(&self, item: &Item) -> impl Future<Output = Result<()>> + Send + 'static {
        let allowed = self.capabilities.require(Operation::Download);
        let downloads = Arc::clone(&self.services.downloads);
        let progress = Arc::clone(&self.services.download_progress);
        let item = item.clone();

        async move {
            allowed?;
            let on_progress = progress.for_file(item.title());
            downloads
                .download(&item, on_progress)
                .await
                .map_err(|err| Error::remote(Operation::Download, item.id(), err))
        }
    }

    /// Hands an edited copy of `original` to the upload pipeline.
    ///
    /// Returns once the copy is queued; the upload itself is not awaited.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapabilityDisabled`] if editing is not enabled.
    pub fn save_edited_copy(
        &self,
        edited: EditedImage,
        collection: CollectionId,
        original: &Item,
    ) -> Result<()> {
        self.capabilities.require(Operation::Upload)?;

        let uploads = &self.services.uploads;
        uploads.prepare_session();
        uploads.show_progress();
        uploads.enqueue(edited, collection, original.clone());
        tracing::info!(item = %original.id(), collection = collection.0, "edited copy queued");
        Ok(())
    }

    /// Requests a full resync. Clearing unsynced entries is up to the sync
    /// service once it has the authoritative state.
    pub fn trigger_remote_sync(&self) -> impl Future<Output = Result<()>> + Send + 'static {
        let sync = Arc::clone(&self.services.sync);

        async move {
            sync.resync()
                .await
                .map_err(|err| Error::Sync(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::DownloadProgress;
    use crate::domain::gallery::{UnsyncedUpdate, UserId};
    use crate::test_utils::Fakes;
    use chrono::Utc;
    use std::time::Duration;

    fn item(id: i64, favorite: bool) -> Item {
        Item::new(
            ItemId::new(id),
            UserId(1),
            CollectionId(3),
            Utc::now(),
            format!("photo-{id}.jpg"),
        )
        .with_favorite(favorite)
    }

    fn coordinator(fakes: &Fakes, capabilities: Capabilities) -> ViewerCoordinator {
        ViewerCoordinator::new(fakes.services(), capabilities, fakes.unsynced.clone())
    }

    #[test]
    fn visibility_is_reported_on_open_and_close_only() {
        let fakes = Fakes::new();
        let mut viewer = coordinator(&fakes, Capabilities::all());

        viewer.close();
        viewer.open(2);
        viewer.navigate(5);
        viewer.open(1);
        assert_eq!(viewer.state(), ViewerState::Open { index: 1 });
        viewer.close();
        viewer.navigate(3);

        assert_eq!(viewer.state(), ViewerState::Closed);
        assert_eq!(fakes.visibility.events(), vec![true, false]);
    }

    #[tokio::test]
    async fn toggling_favorite_twice_alternates_remote_calls() {
        let fakes = Fakes::new();
        let viewer = coordinator(&fakes, Capabilities::all());
        let photo = item(1, true);

        assert_eq!(viewer.toggle_favorite(&photo).await, Ok(false));
        assert_eq!(viewer.toggle_favorite(&photo).await, Ok(true));

        assert_eq!(
            fakes.favorites.calls(),
            vec![(ItemId::new(1), false), (ItemId::new(1), true)]
        );
        assert_eq!(
            fakes.unsynced.get(ItemId::new(1)),
            Some(UnsyncedUpdate::Favorite(true))
        );
    }

    #[tokio::test]
    async fn rejected_favorite_propagates_and_writes_nothing() {
        let fakes = Fakes::new();
        fakes.favorites.fail_next();
        let viewer = coordinator(&fakes, Capabilities::all());

        let result = viewer.toggle_favorite(&item(4, false)).await;

        match result {
            Err(Error::RemoteMutation(err)) => {
                assert_eq!(err.operation, Operation::Favorite);
                assert_eq!(err.item_id, ItemId::new(4));
            }
            other => panic!("expected remote mutation error, got {other:?}"),
        }
        assert!(fakes.unsynced.is_empty());
    }

    #[tokio::test]
    async fn disabled_capability_makes_no_remote_call() {
        let fakes = Fakes::new();
        let viewer = coordinator(&fakes, Capabilities::none());
        let photo = item(1, false);

        assert_eq!(
            viewer.toggle_favorite(&photo).await,
            Err(Error::CapabilityDisabled(Operation::Favorite))
        );
        assert_eq!(
            viewer.delete_item(&photo).await,
            Err(Error::CapabilityDisabled(Operation::Delete))
        );
        assert_eq!(
            viewer.download_item(&photo).await,
            Err(Error::CapabilityDisabled(Operation::Download))
        );
        assert_eq!(
            viewer.save_edited_copy(EditedImage::new("x.jpg", vec![1]), CollectionId(3), &photo),
            Err(Error::CapabilityDisabled(Operation::Upload))
        );

        assert!(fakes.favorites.calls().is_empty());
        assert!(fakes.trash.calls().is_empty());
        assert!(fakes.uploads.events().is_empty());
    }

    #[tokio::test]
    async fn delete_resolves_after_viewer_closed() {
        let fakes = Fakes::new();
        let release = fakes.trash.hold();
        let mut viewer = coordinator(&fakes, Capabilities::all());
        let photo = item(9, false);

        viewer.open(0);
        let pending = tokio::spawn(viewer.delete_item(&photo));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(fakes.unsynced.is_empty());

        viewer.close();
        drop(viewer);
        release.send(()).expect("trash call still pending");

        let deleted = pending.await.expect("delete task panicked");
        assert_eq!(deleted, Ok(ItemId::new(9)));
        assert_eq!(fakes.unsynced.len(), 1);
        assert!(fakes.unsynced.is_temp_deleted(ItemId::new(9)));
        assert_eq!(fakes.trash.calls(), vec![vec![ItemId::new(9)]]);
    }

    #[tokio::test]
    async fn download_reports_progress_under_item_title() {
        let fakes = Fakes::new();
        let viewer = coordinator(&fakes, Capabilities::all());

        viewer.download_item(&item(5, false)).await.expect("download");

        assert_eq!(fakes.progress.titles(), vec!["photo-5.jpg".to_string()]);
        assert_eq!(
            fakes.progress.updates(),
            vec![DownloadProgress::Running(0.5), DownloadProgress::Finished]
        );
    }

    #[test]
    fn save_edited_copy_prepares_shows_and_enqueues() {
        let fakes = Fakes::new();
        let viewer = coordinator(&fakes, Capabilities::all());

        viewer
            .save_edited_copy(
                EditedImage::new("edit.jpg", vec![0; 8]),
                CollectionId(3),
                &item(2, false),
            )
            .expect("queued");

        assert_eq!(
            fakes.uploads.events(),
            vec![
                "prepare".to_string(),
                "progress".to_string(),
                "enqueue edit.jpg into 3 from 2".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn resync_failure_maps_to_sync_error() {
        let fakes = Fakes::new();
        fakes.sync.fail_next();
        let viewer = coordinator(&fakes, Capabilities::all());

        assert!(matches!(
            viewer.trigger_remote_sync().await,
            Err(Error::Sync(_))
        ));
        assert_eq!(viewer.trigger_remote_sync().await, Ok(()));
        assert_eq!(fakes.sync.calls(), 2);
    }

    #[test]
    fn capabilities_from_config_default_to_enabled() {
        let config = CapabilitiesConfig {
            delete: Some(false),
            ..CapabilitiesConfig::default()
        };
        let capabilities = Capabilities::from(&config);

        assert!(capabilities.favorite);
        assert!(!capabilities.delete);
        assert!(capabilities.allows(Operation::Upload));
    }
}
