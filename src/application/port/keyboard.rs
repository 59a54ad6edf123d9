// SPDX-License-Identifier: MPL-2.0
//! Keyboard notification port.
//!
//! The gallery only needs to know when a modifier key goes down or up. A
//! [`KeyEventSource`] delivers those notifications to registered listeners;
//! [`KeyEventHub`] is the in-process implementation that the gallery frame
//! feeds from its Iced subscription.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

// =============================================================================
// Key Types
// =============================================================================

/// Modifier keys that can drive range selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModifierKey {
    #[default]
    Shift,
    Control,
    Alt,
    /// Command on macOS, Windows key elsewhere.
    Logo,
}

/// A modifier key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(ModifierKey),
    Released(ModifierKey),
}

impl KeyEvent {
    /// The key this event is about.
    #[must_use]
    pub fn key(self) -> ModifierKey {
        match self {
            KeyEvent::Pressed(key) | KeyEvent::Released(key) => key,
        }
    }
}

/// Identifies a registered listener so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Callback invoked for each key event.
pub type KeyListener = Box<dyn Fn(KeyEvent) + Send + Sync>;

// =============================================================================
// KeyEventSource Trait
// =============================================================================

/// Port for subscribing to system key-down/key-up notifications.
pub trait KeyEventSource: Send + Sync {
    /// Registers a listener and returns the id needed to remove it.
    fn subscribe(&self, listener: KeyListener) -> ListenerId;

    /// Removes a listener. Returns `false` if it was not registered.
    fn unsubscribe(&self, id: ListenerId) -> bool;
}

// =============================================================================
// KeyEventHub
// =============================================================================

/// In-process key event broadcaster.
#[derive(Default)]
pub struct KeyEventHub {
    listeners: Mutex<Vec<(ListenerId, KeyListener)>>,
    next_id: AtomicU64,
}

impl KeyEventHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<(ListenerId, KeyListener)>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Delivers `event` to every registered listener, in registration order.
    pub fn dispatch(&self, event: KeyEvent) {
        for (_, listener) in self.listeners().iter() {
            listener(event);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners().len()
    }
}

impl KeyEventSource for KeyEventHub {
    fn subscribe(&self, listener: KeyListener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }
}

impl fmt::Debug for KeyEventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyEventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
