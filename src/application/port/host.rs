// SPDX-License-Identifier: MPL-2.0
//! Host-side observers.

/// Notified whenever the full-screen viewer opens or closes, so the host can
/// adjust its own chrome (navigation bar, upload button, ...).
pub trait ViewerVisibilityObserver: Send + Sync {
    fn viewer_visibility_changed(&self, open: bool);
}

/// Observer for hosts that do not react to viewer visibility.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreVisibility;

impl ViewerVisibilityObserver for IgnoreVisibility {
    fn viewer_visibility_changed(&self, _open: bool) {}
}
