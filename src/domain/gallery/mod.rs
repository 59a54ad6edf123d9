// SPDX-License-Identifier: MPL-2.0
//! Gallery domain types.
//!
//! - [`Item`] and its identifiers, [`GalleryItems`] (the item source)
//! - [`SelectionContext`]: the browsing scope a selection belongs to
//! - [`UnsyncedUpdates`]: acknowledged mutations awaiting the next sync

mod context;
mod item;
mod unsynced;

pub use context::{SelectionContext, SelectionMode};
pub use item::{CollectionId, GalleryItems, Item, ItemId, MediaKind, PersonId, UserId};
pub use unsynced::{UnsyncedHandle, UnsyncedUpdate, UnsyncedUpdates};
