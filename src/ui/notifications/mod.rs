// SPDX-License-Identifier: MPL-2.0
//! Toast notifications reporting mutation outcomes.
//!
//! Toasts hold an i18n key plus arguments and are resolved at render time.
//! Success and info toasts expire after 3s, warnings after 5s, errors stay
//! until dismissed. At most 3 are visible; the rest wait in a queue.

mod manager;
mod notification;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
