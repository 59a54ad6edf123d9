// SPDX-License-Identifier: MPL-2.0
//! Gallery item identifiers and the item source consumed by the grid.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

/// Unique identifier of a photo or video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(i64);

impl ItemId {
    /// Wraps a raw remote identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the account owning an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

/// Identifier of a collection (album, trash, hidden section, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectionId(pub i64);

/// Identifier of a person cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonId(pub String);

impl PersonId {
    /// Creates a person identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

// =============================================================================
// Item
// =============================================================================

/// Kind of media an item holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
    LivePhoto,
}

/// A photo or video as last synced from the remote store.
///
/// The favorite flag is the last known value and may be stale; the
/// authoritative view is obtained through
/// [`UnsyncedHandle::favorite_status`](super::UnsyncedHandle::favorite_status).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    owner: UserId,
    created_at: DateTime<Utc>,
    collection: CollectionId,
    favorite: bool,
    title: String,
    kind: MediaKind,
}

impl Item {
    /// Creates an image item that is not a favorite.
    pub fn new(
        id: ItemId,
        owner: UserId,
        collection: CollectionId,
        created_at: DateTime<Utc>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id,
            owner,
            created_at,
            collection,
            favorite: false,
            title: title.into(),
            kind: MediaKind::Image,
        }
    }

    /// Builds the creation instant from epoch microseconds, as stored remotely.
    ///
    /// Out-of-range values fall back to the Unix epoch.
    #[must_use]
    pub fn created_from_micros(micros: i64) -> DateTime<Utc> {
        Utc.timestamp_micros(micros)
            .single()
            .unwrap_or_default()
    }

    /// Sets the last known favorite flag.
    #[must_use]
    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    /// Sets the media kind.
    #[must_use]
    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub fn owner(&self) -> UserId {
        self.owner
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn collection(&self) -> CollectionId {
        self.collection
    }

    /// Favorite flag as of the last sync.
    #[must_use]
    pub fn is_favorite(&self) -> bool {
        self.favorite
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }
}

// =============================================================================
// GalleryItems
// =============================================================================

/// Ordered items plus the collections each item belongs to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryItems {
    items: Vec<Item>,
    memberships: HashMap<ItemId, BTreeSet<CollectionId>>,
}

impl GalleryItems {
    /// Creates a source where every item only belongs to its own collection.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        let memberships = items
            .iter()
            .map(|item| (item.id(), BTreeSet::from([item.collection()])))
            .collect();
        Self { items, memberships }
    }

    /// Records that `item` also belongs to `collection`.
    pub fn add_membership(&mut self, item: ItemId, collection: CollectionId) {
        self.memberships.entry(item).or_default().insert(collection);
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Collections the item is a member of (empty for unknown items).
    pub fn collections_of(&self, item: ItemId) -> impl Iterator<Item = CollectionId> + '_ {
        self.memberships
            .get(&item)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
