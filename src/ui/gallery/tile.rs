// SPDX-License-Identifier: MPL-2.0
//! Per-tile render state handed to the list renderer.

use crate::domain::gallery::{ItemId, MediaKind};

/// Everything a tile needs to draw itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileProps {
    pub item: ItemId,
    /// Position in the visible window.
    pub index: usize,
    pub kind: MediaKind,
    pub selected: bool,
    /// Inside the range previewed while the modifier is held.
    pub in_select_range: bool,
    /// Favorite flag including unsynced overrides.
    pub favorite: bool,
    /// Whether the selection checkbox is shown.
    pub selectable: bool,
    /// A favorite or delete for this item awaits the server.
    pub pending: bool,
}

/// External list virtualizer that draws grouped tiles.
pub trait FileListRenderer {
    /// Called once per date group, in display order.
    fn render_group(&mut self, label: &str, tiles: &[TileProps]);
}
