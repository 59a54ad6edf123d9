// SPDX-License-Identifier: MPL-2.0
//! Held-modifier tracking
//!
//! Watches one modifier key through a [`KeyEventSource`] for as long as the
//! tracker lives. The subscription is released when the tracker is dropped.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::application::port::{KeyEvent, KeyEventSource, ListenerId, ModifierKey};

/// Scoped observer of a modifier key.
pub struct ModifierKeyTracker {
    source: Arc<dyn KeyEventSource>,
    listener: ListenerId,
    key: ModifierKey,
    held: Arc<AtomicBool>,
}

impl ModifierKeyTracker {
    /// Subscribes to `source` and starts tracking `key`.
    pub fn activate(source: Arc<dyn KeyEventSource>, key: ModifierKey) -> Self {
        let held = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&held);
        let listener = source.subscribe(Box::new(move |event| {
            if event.key() == key {
                flag.store(matches!(event, KeyEvent::Pressed(_)), Ordering::Relaxed);
            }
        }));
        tracing::debug!(%listener, ?key, "modifier tracking started");

        Self {
            source,
            listener,
            key,
            held,
        }
    }

    /// Whether the tracked key is currently down.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn key(&self) -> ModifierKey {
        self.key
    }

    /// Forgets a press whose release will never arrive, e.g. after the
    /// window lost focus.
    pub fn reset(&self) {
        self.held.store(false, Ordering::Relaxed);
    }
}

impl Drop for ModifierKeyTracker {
    fn drop(&mut self) {
        let removed = self.source.unsubscribe(self.listener);
        self.held.store(false, Ordering::Relaxed);
        tracing::debug!(listener = %self.listener, removed, "modifier tracking stopped");
    }
}

impl fmt::Debug for ModifierKeyTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierKeyTracker")
            .field("key", &self.key)
            .field("held", &self.is_held())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::KeyEventHub;

    fn hub() -> Arc<KeyEventHub> {
        Arc::new(KeyEventHub::new())
    }

    #[test]
    fn tracks_press_and_release_of_its_key() {
        let hub = hub();
        let tracker = ModifierKeyTracker::activate(hub.clone(), ModifierKey::Shift);
        assert!(!tracker.is_held());

        hub.dispatch(KeyEvent::Pressed(ModifierKey::Shift));
        assert!(tracker.is_held());

        hub.dispatch(KeyEvent::Released(ModifierKey::Shift));
        assert!(!tracker.is_held());
    }

    #[test]
    fn ignores_other_modifiers() {
        let hub = hub();
        let tracker = ModifierKeyTracker::activate(hub.clone(), ModifierKey::Shift);

        hub.dispatch(KeyEvent::Pressed(ModifierKey::Control));
        assert!(!tracker.is_held());
    }

    #[test]
    fn drop_while_held_releases_subscription() {
        let hub = hub();
        let tracker = ModifierKeyTracker::activate(hub.clone(), ModifierKey::Alt);
        hub.dispatch(KeyEvent::Pressed(ModifierKey::Alt));
        assert!(tracker.is_held());
        assert_eq!(hub.listener_count(), 1);

        drop(tracker);

        assert_eq!(hub.listener_count(), 0);
        hub.dispatch(KeyEvent::Released(ModifierKey::Alt));
    }

    #[test]
    fn two_trackers_on_one_hub_are_independent() {
        let hub = hub();
        let first = ModifierKeyTracker::activate(hub.clone(), ModifierKey::Shift);
        let second = ModifierKeyTracker::activate(hub.clone(), ModifierKey::Shift);
        assert_eq!(hub.listener_count(), 2);

        hub.dispatch(KeyEvent::Pressed(ModifierKey::Shift));
        drop(first);

        assert_eq!(hub.listener_count(), 1);
        assert!(second.is_held());
    }

    #[test]
    fn reset_clears_stuck_key() {
        let hub = hub();
        let tracker = ModifierKeyTracker::activate(hub.clone(), ModifierKey::Logo);
        hub.dispatch(KeyEvent::Pressed(ModifierKey::Logo));

        tracker.reset();

        assert!(!tracker.is_held());
    }
}
