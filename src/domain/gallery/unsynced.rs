// SPDX-License-Identifier: MPL-2.0
//! In-memory mutations acknowledged by the remote but not yet seen in a sync.
//!
//! After the viewer favorites or trashes an item, the remote store has the
//! change but the locally cached item list is still the previous snapshot.
//! Until the next full sync replaces that snapshot, views consult these
//! entries so that they show the acknowledged state.

use super::item::{Item, ItemId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A single remotely acknowledged change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsyncedUpdate {
    /// The item's favorite status as last set from this client.
    Favorite(bool),
    /// The item was moved to trash.
    TempDeleted,
}

/// Unsynced updates keyed by item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnsyncedUpdates {
    entries: HashMap<ItemId, UnsyncedUpdate>,
}

impl UnsyncedUpdates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_favorite(&mut self, id: ItemId, favorite: bool) {
        self.entries.insert(id, UnsyncedUpdate::Favorite(favorite));
    }

    pub fn mark_temp_deleted(&mut self, id: ItemId) {
        self.entries.insert(id, UnsyncedUpdate::TempDeleted);
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<UnsyncedUpdate> {
        self.entries.get(&id).copied()
    }

    /// Favorite status taking unsynced overrides into account.
    #[must_use]
    pub fn favorite_status(&self, item: &Item) -> bool {
        match self.get(item.id()) {
            Some(UnsyncedUpdate::Favorite(favorite)) => favorite,
            _ => item.is_favorite(),
        }
    }

    #[must_use]
    pub fn is_temp_deleted(&self, id: ItemId) -> bool {
        matches!(self.get(id), Some(UnsyncedUpdate::TempDeleted))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, UnsyncedUpdate)> + '_ {
        self.entries.iter().map(|(id, update)| (*id, *update))
    }
}

/// Shared handle to the unsynced updates.
///
/// The viewer coordinator writes through it once a remote call succeeds; the
/// gallery frame and the resync collaborator read and clear it.
#[derive(Debug, Clone, Default)]
pub struct UnsyncedHandle {
    inner: Arc<Mutex<UnsyncedUpdates>>,
}

impl UnsyncedHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, UnsyncedUpdates> {
        // Entries are plain values, a panic mid-insert cannot leave them torn.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn mark_favorite(&self, id: ItemId, favorite: bool) {
        self.lock().mark_favorite(id, favorite);
    }

    pub fn mark_temp_deleted(&self, id: ItemId) {
        self.lock().mark_temp_deleted(id);
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<UnsyncedUpdate> {
        self.lock().get(id)
    }

    #[must_use]
    pub fn favorite_status(&self, item: &Item) -> bool {
        self.lock().favorite_status(item)
    }

    #[must_use]
    pub fn is_temp_deleted(&self, id: ItemId) -> bool {
        self.lock().is_temp_deleted(id)
    }

    /// Drops every entry. Called once an authoritative sync has been ingested.
    pub fn clear(&self) {
        self.lock().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
