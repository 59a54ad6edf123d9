// SPDX-License-Identifier: MPL-2.0
//! Toast data: a severity plus an i18n key and its arguments.

use crate::error::{Error, Operation};
use crate::i18n::I18n;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level determines display duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Info,
    Warning,
    /// Stays until dismissed.
    Error,
}

impl Severity {
    /// Returns `None` for errors (manual dismiss required).
    #[must_use]
    pub fn auto_dismiss_duration(&self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
    /// Mutation this toast reports on, recorded with the diagnostic event.
    operation: Option<Operation>,
    created_at: Instant,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            operation: None,
            created_at: Instant::now(),
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Builds the error toast for a failed gallery operation.
    ///
    /// `title` names the item the operation targeted, when there is one.
    pub fn from_error(error: &Error, title: Option<&str>) -> Self {
        let mut notification = Self::error(error.i18n_key());
        notification.operation = match error {
            Error::RemoteMutation(err) => Some(err.operation),
            Error::CapabilityDisabled(op) => Some(*op),
            Error::Io(_) | Error::Config(_) | Error::Sync(_) => None,
        };
        if let Some(title) = title {
            notification = notification.with_arg("title", title);
        }
        notification
    }

    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// Resolves the message text in the current locale.
    #[must_use]
    pub fn text(&self, i18n: &I18n) -> String {
        let args: Vec<(&str, &str)> = self
            .message_args
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        i18n.tr_with_args(&self.message_key, &args)
    }

    #[must_use]
    pub fn should_auto_dismiss(&self) -> bool {
        self.severity
            .auto_dismiss_duration()
            .is_some_and(|duration| self.created_at.elapsed() >= duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::gallery::ItemId;

    #[test]
    fn notification_ids_are_unique() {
        let n1 = Notification::success("test");
        let n2 = Notification::success("test");
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn error_severity_has_no_auto_dismiss() {
        assert!(Severity::Error.auto_dismiss_duration().is_none());
        assert!(!Notification::error("x").should_auto_dismiss());
    }

    #[test]
    fn warning_duration_is_longer_than_success() {
        assert!(Severity::Warning.auto_dismiss_duration() > Severity::Success.auto_dismiss_duration());
    }

    #[test]
    fn from_error_carries_operation_and_title() {
        let error = Error::remote(Operation::Delete, ItemId::new(7), "offline");
        let notification = Notification::from_error(&error, Some("beach.jpg"));

        assert_eq!(notification.severity(), Severity::Error);
        assert_eq!(notification.message_key(), "notification-delete-error");
        assert_eq!(notification.operation(), Some(Operation::Delete));
        assert_eq!(
            notification.message_args(),
            &[("title".to_string(), "beach.jpg".to_string())]
        );
    }

    #[test]
    fn text_interpolates_arguments() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        let notification =
            Notification::error("notification-delete-error").with_arg("title", "beach.jpg");

        assert_eq!(notification.text(&i18n), "Could not move beach.jpg to trash");
    }
}
