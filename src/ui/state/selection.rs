// SPDX-License-Identifier: MPL-2.0
//! Tile selection state
//!
//! Tracks which items are selected, the browsing scope the selection was made
//! in, and the anchor used by modifier-held range selection.

use std::collections::{HashMap, HashSet};

use crate::domain::gallery::{Item, ItemId, SelectionContext, UserId};

/// Selected entries plus the scope they were made in.
///
/// `count` always equals the number of `true` entries, and `owned` holds
/// those owned by the signed-in user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    entries: HashMap<ItemId, bool>,
    count: usize,
    owned: HashSet<ItemId>,
    /// `None` until the first selection.
    context: Option<SelectionContext>,
}

impl SelectionState {
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn own_count(&self) -> usize {
        self.owned.len()
    }

    #[must_use]
    pub fn context(&self) -> Option<&SelectionContext> {
        self.context.as_ref()
    }

    /// Iterates over selected item ids in no particular order.
    pub fn selected_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.entries
            .iter()
            .filter_map(|(id, selected)| selected.then_some(*id))
    }

    fn is_set(&self, id: ItemId) -> bool {
        self.entries.get(&id).copied().unwrap_or(false)
    }

    fn reset(&mut self, context: SelectionContext) {
        self.clear_entries();
        self.context = Some(context);
    }

    fn clear_entries(&mut self) {
        self.entries.clear();
        self.owned.clear();
        self.count = 0;
    }

    fn drop_entry(&mut self, id: ItemId) {
        if self.entries.remove(&id) == Some(true) {
            self.count -= 1;
        }
        self.owned.remove(&id);
    }
}

/// Why a range selection did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSkip {
    /// No tile was explicitly clicked since the selection became empty.
    NoAnchor,
    /// The target is the anchor itself.
    SameIndex,
    /// Anchor or target lies outside the item window.
    OutOfBounds,
}

/// Result of [`SelectionStore::range_select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    Applied {
        /// Whether the range ended up selected or cleared.
        selected: bool,
        /// Tiles whose visible state changed.
        affected: usize,
    },
    Skipped(RangeSkip),
}

/// Selection state machine for the gallery grid.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    state: SelectionState,
    active: SelectionContext,
    anchor: Option<usize>,
    user: UserId,
}

impl SelectionStore {
    /// Creates an empty store for `user` browsing `active`.
    #[must_use]
    pub fn new(user: UserId, active: SelectionContext) -> Self {
        Self {
            state: SelectionState::default(),
            active,
            anchor: None,
            user,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn active_context(&self) -> &SelectionContext {
        &self.active
    }

    /// Switches the scope being browsed.
    ///
    /// Entries are kept but stop rendering as selected unless the new scope
    /// matches theirs. The anchor indexes the old window and is dropped.
    pub fn set_active_context(&mut self, active: SelectionContext) {
        if active != self.active {
            self.active = active;
            self.anchor = None;
        }
    }

    #[must_use]
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.state.count
    }

    #[must_use]
    pub fn own_count(&self) -> usize {
        self.state.own_count()
    }

    /// Returns whether the current selection applies to the active scope.
    #[must_use]
    pub fn in_active_scope(&self) -> bool {
        self.state
            .context
            .as_ref()
            .is_some_and(|context| context.matches(&self.active))
    }

    /// Returns whether anything is selected in the active scope.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.state.count > 0 && self.in_active_scope()
    }

    /// Returns whether `id` renders as selected in the active scope.
    #[must_use]
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.in_active_scope() && self.state.is_set(id)
    }

    /// Sets the selection entry of `item`.
    ///
    /// A selection made in a different scope is discarded first, so the
    /// result is just this item. With an `index`, selecting moves the range
    /// anchor there and deselecting clears it.
    pub fn set_selected(&mut self, item: &Item, index: Option<usize>, checked: bool) {
        if !self.in_active_scope() {
            self.state.reset(self.active.clone());
        }

        if let Some(index) = index {
            self.anchor = checked.then_some(index);
        }

        let id = item.id();
        if self.state.is_set(id) != checked {
            if checked {
                self.state.count += 1;
            } else {
                self.state.count -= 1;
            }
        }
        if checked && item.owner() == self.user {
            self.state.owned.insert(id);
        } else {
            self.state.owned.remove(&id);
        }
        self.state.entries.insert(id, checked);

        self.clear_on_empty();
    }

    /// Flips the selection of the tile at `index`.
    pub fn toggle(&mut self, item: &Item, index: usize) {
        let checked = !self.is_selected(item.id());
        self.set_selected(item, Some(index), checked);
    }

    /// Selects or clears every tile between the anchor and `target`.
    ///
    /// If the whole inclusive range is already selected it is cleared,
    /// otherwise all of it is selected. The target is applied last so the
    /// anchor follows it.
    pub fn range_select(&mut self, target: usize, window: &[Item]) -> RangeOutcome {
        let outcome = self.apply_range(target, window);
        if let RangeOutcome::Skipped(reason) = outcome {
            tracing::debug!(anchor = ?self.anchor, target, ?reason, "range selection skipped");
        }
        outcome
    }

    fn apply_range(&mut self, target: usize, window: &[Item]) -> RangeOutcome {
        let Some(anchor) = self.anchor else {
            return RangeOutcome::Skipped(RangeSkip::NoAnchor);
        };
        if anchor == target {
            return RangeOutcome::Skipped(RangeSkip::SameIndex);
        }
        if anchor >= window.len() || target >= window.len() {
            return RangeOutcome::Skipped(RangeSkip::OutOfBounds);
        }

        let span = &window[anchor.min(target)..=anchor.max(target)];
        let all_selected = span.iter().all(|item| self.is_selected(item.id()));
        let checked = !all_selected;
        let affected = span
            .iter()
            .filter(|item| self.is_selected(item.id()) != checked)
            .count();

        let intermediate: Box<dyn Iterator<Item = usize>> = if anchor < target {
            Box::new(anchor..target)
        } else {
            Box::new((target + 1..=anchor).rev())
        };
        for index in intermediate {
            self.set_selected(&window[index], None, checked);
        }
        self.set_selected(&window[target], Some(target), checked);

        RangeOutcome::Applied {
            selected: checked,
            affected,
        }
    }

    /// Selects or clears every item of a date group. Leaves the anchor alone.
    ///
    /// Returns how many tiles changed.
    pub fn set_many(&mut self, items: &[Item], checked: bool) -> usize {
        let affected = items
            .iter()
            .filter(|item| self.is_selected(item.id()) != checked)
            .count();
        for item in items {
            self.set_selected(item, None, checked);
        }
        affected
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.state.clear_entries();
        self.anchor = None;
    }

    /// Drops the entry of an item that left the gallery, wherever it was.
    ///
    /// The anchor is left alone; use [`Self::forget`] when the item's window
    /// position is known.
    pub fn forget_entry(&mut self, id: ItemId) {
        self.state.drop_entry(id);
        self.clear_on_empty();
    }

    /// Drops `id`, which was removed from the window at `removed_index`.
    ///
    /// The anchor is cleared if it pointed at the item, or shifted down if it
    /// pointed past it.
    pub fn forget(&mut self, id: ItemId, removed_index: usize) {
        self.state.drop_entry(id);

        self.anchor = match self.anchor {
            Some(anchor) if anchor == removed_index => None,
            Some(anchor) if anchor > removed_index => Some(anchor - 1),
            other => other,
        };

        self.clear_on_empty();
    }

    /// Returns whether `index` lies in the range previewed from the anchor to
    /// the hovered tile.
    #[must_use]
    pub fn in_pending_range(&self, index: usize, hover: Option<usize>) -> bool {
        match (self.anchor, hover) {
            (Some(anchor), Some(hover)) => (anchor.min(hover)..=anchor.max(hover)).contains(&index),
            _ => false,
        }
    }

    fn clear_on_empty(&mut self) {
        if self.state.count == 0 {
            self.anchor = None;
        }
    }
}
