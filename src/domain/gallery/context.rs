// SPDX-License-Identifier: MPL-2.0
//! Browsing scope a selection belongs to.

use super::item::{CollectionId, PersonId};
use serde::{Deserialize, Serialize};

/// How the gallery is currently being browsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    /// No explicit mode; scopes are told apart by collection only.
    #[default]
    Legacy,
    Albums,
    HiddenAlbums,
    People,
}

/// Identifies which browsing scope a selection was made in.
///
/// The same type describes the scope the user is currently looking at, so
/// that a selection made in one album never shows up in another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionContext {
    pub mode: SelectionMode,
    pub collection: CollectionId,
    /// Only meaningful in [`SelectionMode::People`].
    pub person: Option<PersonId>,
}

impl SelectionContext {
    /// Scope of a collection browsed in the given mode.
    #[must_use]
    pub fn collection(mode: SelectionMode, collection: CollectionId) -> Self {
        Self {
            mode,
            collection,
            person: None,
        }
    }

    /// Scope of a person cluster. `collection` is the collection that was
    /// active before switching to the person.
    #[must_use]
    pub fn person(person: PersonId, collection: CollectionId) -> Self {
        Self {
            mode: SelectionMode::People,
            collection,
            person: Some(person),
        }
    }

    /// Returns whether a selection made in `self` applies to the `active` scope.
    #[must_use]
    pub fn matches(&self, active: &SelectionContext) -> bool {
        match active.mode {
            SelectionMode::Legacy => self.collection == active.collection,
            SelectionMode::People => self.mode == active.mode && self.person == active.person,
            SelectionMode::Albums | SelectionMode::HiddenAlbums => {
                self.mode == active.mode && self.collection == active.collection
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_scope_compares_collection_only() {
        let selected = SelectionContext::collection(SelectionMode::Albums, CollectionId(7));
        let active = SelectionContext::collection(SelectionMode::Legacy, CollectionId(7));
        assert!(selected.matches(&active));

        let other = SelectionContext::collection(SelectionMode::Legacy, CollectionId(8));
        assert!(!selected.matches(&other));
    }

    #[test]
    fn album_scope_requires_same_mode_and_collection() {
        let selected = SelectionContext::collection(SelectionMode::Albums, CollectionId(7));
        assert!(selected.matches(&SelectionContext::collection(
            SelectionMode::Albums,
            CollectionId(7)
        )));
        assert!(!selected.matches(&SelectionContext::collection(
            SelectionMode::HiddenAlbums,
            CollectionId(7)
        )));
        assert!(!selected.matches(&SelectionContext::collection(
            SelectionMode::Albums,
            CollectionId(9)
        )));
    }

    #[test]
    fn people_scope_ignores_collection() {
        let selected = SelectionContext::person(PersonId::new("p1"), CollectionId(1));
        let same_person = SelectionContext::person(PersonId::new("p1"), CollectionId(2));
        let other_person = SelectionContext::person(PersonId::new("p2"), CollectionId(1));

        assert!(selected.matches(&same_person));
        assert!(!selected.matches(&other_person));
    }
}
