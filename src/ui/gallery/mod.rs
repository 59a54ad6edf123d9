// SPDX-License-Identifier: MPL-2.0
//! Gallery grid frame.
//!
//! [`GalleryFrame`] owns the selection store, the held-modifier tracker and
//! the viewer coordinator, and turns tile gestures into selection changes or
//! viewer requests. Drawing is left to a [`FileListRenderer`].

pub mod component;
pub mod tile;

pub use component::{Effect, GalleryFrame, GallerySettings, Message};
pub use tile::{FileListRenderer, TileProps};
