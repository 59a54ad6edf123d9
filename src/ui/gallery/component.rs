// SPDX-License-Identifier: MPL-2.0
//! Gallery frame: wires grid tiles to the selection store and the viewer.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use iced::{event, keyboard, window, Subscription, Task};

use super::tile::{FileListRenderer, TileProps};
use crate::application::port::{EditedImage, KeyEvent, KeyEventHub, ModifierKey};
use crate::application::query::timeline::{group_by_date, DateBucketer, DisplayGroup};
use crate::config::Config;
use crate::diagnostics::{DiagnosticsHandle, UserAction};
use crate::domain::gallery::{
    CollectionId, GalleryItems, Item, ItemId, SelectionContext, UnsyncedHandle, UserId,
};
use crate::error::{Error, Operation, Result};
use crate::i18n::I18n;
use crate::ui::notifications::{Manager as NotificationManager, Notification, NotificationMessage};
use crate::ui::state::{ModifierKeyTracker, RangeOutcome, SelectionStore};
use crate::ui::viewer::{Capabilities, ViewerCoordinator, ViewerServices};

/// Host-supplied settings for one gallery view.
#[derive(Debug, Clone, PartialEq)]
pub struct GallerySettings {
    /// Signed-in user, for counting owned selections.
    pub user: UserId,
    /// Scope currently browsed.
    pub scope: SelectionContext,
    pub selectable: bool,
    /// Browsing the trash, where delete is unavailable.
    pub in_trash: bool,
    pub range_modifier: ModifierKey,
    pub date_format: String,
    pub capabilities: Capabilities,
}

impl GallerySettings {
    #[must_use]
    pub fn from_config(config: &Config, user: UserId, scope: SelectionContext) -> Self {
        Self {
            user,
            scope,
            selectable: config.gallery.selectable.unwrap_or(true),
            in_trash: false,
            range_modifier: config.range_modifier(),
            date_format: config.date_format().to_string(),
            capabilities: Capabilities::from(&config.capabilities),
        }
    }

    fn effective_capabilities(&self) -> Capabilities {
        Capabilities {
            delete: self.capabilities.delete && !self.in_trash,
            ..self.capabilities
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Tile body activated.
    TileClicked(usize),
    /// Tile checkbox toggled.
    TileChecked { index: usize, checked: bool },
    TileHovered(Option<usize>),
    /// "Select all" checkbox of a date group.
    GroupChecked {
        first_index: usize,
        len: usize,
        checked: bool,
    },
    ClearSelection,
    Key(KeyEvent),
    WindowUnfocused,
    ViewerNavigated(usize),
    CloseViewer,
    ToggleFavorite,
    DeleteCurrent,
    DownloadCurrent,
    SaveEditedCopy(EditedImage),
    TriggerSync,
    /// The host's item source changed.
    ItemsChanged(GalleryItems),
    ScopeChanged {
        scope: SelectionContext,
        in_trash: bool,
        items: GalleryItems,
    },
    FavoriteFinished {
        item: ItemId,
        result: Result<bool>,
    },
    DeleteFinished {
        item: ItemId,
        result: Result<ItemId>,
    },
    DownloadFinished {
        item: ItemId,
        result: Result<()>,
    },
    SyncFinished(Result<()>),
    Notification(NotificationMessage),
}

/// Outcomes the host reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The selection shown in the active scope changed.
    SelectionChanged { count: usize, own_count: usize },
    /// The server confirmed a delete; the host may drop the item.
    ItemDeleted(ItemId),
}

/// Composition root of the gallery grid.
pub struct GalleryFrame {
    settings: GallerySettings,
    source: GalleryItems,
    /// Source items minus temp-deleted ones; tile indices refer to this.
    visible: Vec<Item>,
    selection: SelectionStore,
    viewer: ViewerCoordinator,
    keys: Arc<KeyEventHub>,
    tracker: ModifierKeyTracker,
    hover: Option<usize>,
    /// Items with a favorite or delete awaiting the server.
    pending: HashSet<ItemId>,
    bucketer: DateBucketer,
    notifications: NotificationManager,
    diagnostics: DiagnosticsHandle,
}

impl GalleryFrame {
    /// Creates the frame and starts tracking the range modifier on `keys`.
    #[must_use]
    pub fn new(
        settings: GallerySettings,
        items: GalleryItems,
        services: ViewerServices,
        unsynced: UnsyncedHandle,
        keys: Arc<KeyEventHub>,
        i18n: &I18n,
        diagnostics: DiagnosticsHandle,
    ) -> Self {
        let tracker = ModifierKeyTracker::activate(keys.clone(), settings.range_modifier);
        let viewer = ViewerCoordinator::new(services, settings.effective_capabilities(), unsynced);
        let selection = SelectionStore::new(settings.user, settings.scope.clone());
        let bucketer = DateBucketer::from_i18n(i18n, &settings.date_format);
        let mut notifications = NotificationManager::new();
        notifications.set_diagnostics(diagnostics.clone());

        let mut frame = Self {
            settings,
            source: items,
            visible: Vec::new(),
            selection,
            viewer,
            keys,
            tracker,
            hover: None,
            pending: HashSet::new(),
            bucketer,
            notifications,
            diagnostics,
        };
        frame.refresh_visible();
        frame
    }

    pub fn update(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::TileClicked(index) => (self.click_tile(index), Task::none()),
            Message::TileChecked { index, checked } => {
                (self.check_tile(index, checked), Task::none())
            }
            Message::TileHovered(hover) => {
                self.hover = hover;
                (Effect::None, Task::none())
            }
            Message::GroupChecked {
                first_index,
                len,
                checked,
            } => (self.check_group(first_index, len, checked), Task::none()),
            Message::ClearSelection => {
                self.selection.clear();
                self.diagnostics.log_action(UserAction::ClearSelection);
                (self.selection_effect(), Task::none())
            }
            Message::Key(event) => {
                self.keys.dispatch(event);
                (Effect::None, Task::none())
            }
            Message::WindowUnfocused => {
                self.tracker.reset();
                (Effect::None, Task::none())
            }
            Message::ViewerNavigated(index) => {
                self.viewer.navigate(index);
                (Effect::None, Task::none())
            }
            Message::CloseViewer => {
                if self.viewer.is_open() {
                    self.viewer.close();
                    self.diagnostics.log_action(UserAction::CloseViewer);
                }
                (Effect::None, Task::none())
            }
            Message::ToggleFavorite => (Effect::None, self.dispatch_favorite()),
            Message::DeleteCurrent => (Effect::None, self.dispatch_delete()),
            Message::DownloadCurrent => (Effect::None, self.dispatch_download()),
            Message::SaveEditedCopy(edited) => {
                self.save_edited_copy(edited);
                (Effect::None, Task::none())
            }
            Message::TriggerSync => {
                self.diagnostics.log_action(UserAction::TriggerSync);
                (
                    Effect::None,
                    Task::perform(self.viewer.trigger_remote_sync(), Message::SyncFinished),
                )
            }
            Message::ItemsChanged(items) => {
                self.source = items;
                self.refresh_visible();
                (self.selection_effect(), Task::none())
            }
            Message::ScopeChanged {
                scope,
                in_trash,
                items,
            } => {
                self.change_scope(scope, in_trash, items);
                (self.selection_effect(), Task::none())
            }
            Message::FavoriteFinished { item, result } => {
                self.pending.remove(&item);
                if let Err(error) = result {
                    self.report_failure(&error, Some(item));
                }
                (Effect::None, Task::none())
            }
            Message::DeleteFinished { item, result } => {
                self.pending.remove(&item);
                match result {
                    Ok(deleted) => {
                        self.remove_deleted(deleted);
                        (Effect::ItemDeleted(deleted), Task::none())
                    }
                    Err(error) => {
                        self.report_failure(&error, Some(item));
                        (Effect::None, Task::none())
                    }
                }
            }
            Message::DownloadFinished { item, result } => {
                if let Err(error) = result {
                    self.report_failure(&error, Some(item));
                }
                (Effect::None, Task::none())
            }
            Message::SyncFinished(result) => {
                match result {
                    Ok(()) => self
                        .notifications
                        .clear_errors_with_key("notification-sync-error"),
                    Err(error) => self.report_failure(&error, None),
                }
                (Effect::None, Task::none())
            }
            Message::Notification(message) => {
                self.notifications.handle_message(&message);
                (Effect::None, Task::none())
            }
        }
    }

    /// Maps modifier key presses and focus loss into frame messages.
    pub fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(named),
                ..
            }) => modifier_for(named).map(|key| Message::Key(KeyEvent::Pressed(key))),
            event::Event::Keyboard(keyboard::Event::KeyReleased {
                key: keyboard::Key::Named(named),
                ..
            }) => modifier_for(named).map(|key| Message::Key(KeyEvent::Released(key))),
            event::Event::Window(window::Event::Unfocused) => Some(Message::WindowUnfocused),
            _ => None,
        })
    }

    /// Rebuilds timeline headings after a language change.
    pub fn set_language(&mut self, i18n: &I18n) {
        self.bucketer = DateBucketer::from_i18n(i18n, &self.settings.date_format);
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Date groups of the visible window as seen at `now`.
    pub fn groups<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<DisplayGroup<'_>> {
        group_by_date(&self.visible, &self.bucketer, now)
    }

    /// Render state of the tile at `index`.
    #[must_use]
    pub fn tile(&self, index: usize) -> Option<TileProps> {
        let item = self.visible.get(index)?;
        let id = item.id();
        Some(TileProps {
            item: id,
            index,
            kind: item.kind(),
            selected: self.selection.is_selected(id),
            in_select_range: self.range_gestures_active()
                && self.selection.in_pending_range(index, self.hover),
            favorite: self.viewer.unsynced().favorite_status(item),
            selectable: self.settings.selectable,
            pending: self.pending.contains(&id),
        })
    }

    /// Feeds every date group with its tiles to `renderer`.
    pub fn render<Tz: TimeZone>(&self, renderer: &mut dyn FileListRenderer, now: &DateTime<Tz>) {
        for group in self.groups(now) {
            let tiles: Vec<TileProps> = group.indices().filter_map(|i| self.tile(i)).collect();
            renderer.render_group(&group.label, &tiles);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn visible_items(&self) -> &[Item] {
        &self.visible
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    #[must_use]
    pub fn viewer(&self) -> &ViewerCoordinator {
        &self.viewer
    }

    #[must_use]
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    #[must_use]
    pub fn settings(&self) -> &GallerySettings {
        &self.settings
    }

    #[must_use]
    pub fn is_pending(&self, item: ItemId) -> bool {
        self.pending.contains(&item)
    }

    /// Whether clicks currently extend a range.
    #[must_use]
    pub fn range_gestures_active(&self) -> bool {
        self.settings.selectable && self.tracker.is_held() && self.selection.has_selection()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    fn click_tile(&mut self, index: usize) -> Effect {
        let Some(item) = self.visible.get(index).cloned() else {
            return Effect::None;
        };

        if self.range_gestures_active() {
            return self.apply_range(index);
        }

        if self.settings.selectable && self.selection.has_selection() {
            self.selection.toggle(&item, index);
            self.diagnostics.log_action(UserAction::SelectItem {
                selected: self.selection.is_selected(item.id()),
            });
            return self.selection_effect();
        }

        self.viewer.open(index);
        self.diagnostics
            .log_action(UserAction::OpenViewer { index });
        Effect::None
    }

    fn check_tile(&mut self, index: usize, checked: bool) -> Effect {
        if !self.settings.selectable {
            return Effect::None;
        }
        if self.range_gestures_active() {
            return self.apply_range(index);
        }
        let Some(item) = self.visible.get(index) else {
            return Effect::None;
        };

        self.selection.set_selected(item, Some(index), checked);
        self.diagnostics
            .log_action(UserAction::SelectItem { selected: checked });
        self.selection_effect()
    }

    fn check_group(&mut self, first_index: usize, len: usize, checked: bool) -> Effect {
        if !self.settings.selectable {
            return Effect::None;
        }
        let Some(items) = first_index
            .checked_add(len)
            .and_then(|end| self.visible.get(first_index..end))
        else {
            return Effect::None;
        };

        let affected = self.selection.set_many(items, checked);
        self.diagnostics.log_action_with_details(
            UserAction::SelectGroup { selected: checked },
            Some(format!("{affected} changed")),
        );
        self.selection_effect()
    }

    fn apply_range(&mut self, index: usize) -> Effect {
        match self.selection.range_select(index, &self.visible) {
            RangeOutcome::Applied { selected, affected } => {
                self.diagnostics
                    .log_action(UserAction::RangeSelect { affected, selected });
                self.selection_effect()
            }
            RangeOutcome::Skipped(_) => Effect::None,
        }
    }

    fn selection_effect(&self) -> Effect {
        if self.selection.in_active_scope() {
            Effect::SelectionChanged {
                count: self.selection.count(),
                own_count: self.selection.own_count(),
            }
        } else {
            Effect::SelectionChanged {
                count: 0,
                own_count: 0,
            }
        }
    }

    // =========================================================================
    // Viewer mutations
    // =========================================================================

    fn current_item(&self) -> Option<Item> {
        self.viewer
            .current_index()
            .and_then(|index| self.visible.get(index))
            .cloned()
    }

    /// Claims `item` for a favorite or delete. `false` if one is in flight.
    fn claim(&mut self, item: ItemId, action: &UserAction) -> bool {
        if self.pending.insert(item) {
            self.diagnostics
                .log_action_with_details(action.clone(), Some(item.to_string()));
            true
        } else {
            tracing::debug!(%item, ?action, "ignored while a mutation is in flight");
            false
        }
    }

    fn dispatch_favorite(&mut self) -> Task<Message> {
        let Some(item) = self.current_item() else {
            return Task::none();
        };
        let id = item.id();
        if !self.claim(id, &UserAction::ToggleFavorite) {
            return Task::none();
        }

        Task::perform(self.viewer.toggle_favorite(&item), move |result| {
            Message::FavoriteFinished { item: id, result }
        })
    }

    fn dispatch_delete(&mut self) -> Task<Message> {
        let Some(item) = self.current_item() else {
            return Task::none();
        };
        let id = item.id();
        if !self.claim(id, &UserAction::DeleteItem) {
            return Task::none();
        }

        Task::perform(self.viewer.delete_item(&item), move |result| {
            Message::DeleteFinished { item: id, result }
        })
    }

    fn dispatch_download(&mut self) -> Task<Message> {
        let Some(item) = self.current_item() else {
            return Task::none();
        };
        let id = item.id();
        self.diagnostics
            .log_action_with_details(UserAction::DownloadItem, Some(id.to_string()));
        if self.viewer.capabilities().download {
            self.notifications.push(
                Notification::success("notification-download-started")
                    .with_arg("title", item.title())
                    .with_operation(Operation::Download),
            );
        }

        Task::perform(self.viewer.download_item(&item), move |result| {
            Message::DownloadFinished { item: id, result }
        })
    }

    fn save_edited_copy(&mut self, edited: EditedImage) {
        let Some(item) = self.current_item() else {
            return;
        };
        let collection = self.upload_collection(&item);
        self.diagnostics
            .log_action_with_details(UserAction::SaveEditedCopy, Some(item.id().to_string()));

        match self.viewer.save_edited_copy(edited, collection, &item) {
            Ok(()) => self.notifications.push(
                Notification::success("notification-upload-started")
                    .with_arg("title", item.title())
                    .with_operation(Operation::Upload),
            ),
            Err(error) => self.report_failure(&error, Some(item.id())),
        }
    }

    /// The active collection if the item is a member of it, else its own.
    fn upload_collection(&self, item: &Item) -> CollectionId {
        let active = self.settings.scope.collection;
        if self.source.collections_of(item.id()).any(|c| c == active) {
            active
        } else {
            item.collection()
        }
    }

    fn report_failure(&mut self, error: &Error, item: Option<ItemId>) {
        tracing::warn!(%error, "gallery operation failed");
        let title = item
            .and_then(|id| self.source.get(id))
            .map(|item| item.title().to_string());
        self.notifications
            .push(Notification::from_error(error, title.as_deref()));
    }

    // =========================================================================
    // Window maintenance
    // =========================================================================

    /// Rebuilds the window from the source, dropping temp-deleted items
    /// from both the window and the selection.
    fn refresh_visible(&mut self) {
        let unsynced = self.viewer.unsynced();
        let mut visible = Vec::with_capacity(self.source.len());
        for item in self.source.items() {
            if unsynced.is_temp_deleted(item.id()) {
                self.selection.forget_entry(item.id());
            } else {
                visible.push(item.clone());
            }
        }
        self.visible = visible;
        self.hover = None;
        self.clamp_viewer();
    }

    /// Drops a trashed item. It may already have left the window through a
    /// refresh, in which case only its selection entry remains.
    fn remove_deleted(&mut self, id: ItemId) {
        match self.visible.iter().position(|item| item.id() == id) {
            Some(index) => {
                self.visible.remove(index);
                self.selection.forget(id, index);
            }
            None => self.selection.forget_entry(id),
        }
        self.hover = None;
        self.clamp_viewer();
    }

    /// Keeps an open viewer on an existing tile, closing it on an empty window.
    fn clamp_viewer(&mut self) {
        let Some(index) = self.viewer.current_index() else {
            return;
        };
        if self.visible.is_empty() {
            self.viewer.close();
        } else if index >= self.visible.len() {
            self.viewer.navigate(self.visible.len() - 1);
        }
    }

    fn change_scope(&mut self, scope: SelectionContext, in_trash: bool, items: GalleryItems) {
        self.viewer.close();
        self.selection.set_active_context(scope.clone());
        self.settings.scope = scope;
        self.settings.in_trash = in_trash;
        self.viewer
            .set_capabilities(self.settings.effective_capabilities());
        self.source = items;
        self.refresh_visible();
    }
}

impl std::fmt::Debug for GalleryFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryFrame")
            .field("visible", &self.visible.len())
            .field("selected", &self.selection.count())
            .field("viewer", &self.viewer.state())
            .finish_non_exhaustive()
    }
}

fn modifier_for(named: keyboard::key::Named) -> Option<ModifierKey> {
    use keyboard::key::Named;
    match named {
        Named::Shift => Some(ModifierKey::Shift),
        Named::Control => Some(ModifierKey::Control),
        Named::Alt => Some(ModifierKey::Alt),
        Named::Super | Named::Meta => Some(ModifierKey::Logo),
        _ => None,
    }
}
