// SPDX-License-Identifier: MPL-2.0
use crate::domain::gallery::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    /// A favorite/delete/download/upload call was rejected by its service.
    RemoteMutation(RemoteMutationError),
    /// The host did not enable the operation for this gallery.
    CapabilityDisabled(Operation),
    /// The full remote resync failed.
    Sync(String),
}

/// Remote mutations the viewer can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Favorite,
    Delete,
    Download,
    Upload,
}

impl Operation {
    /// Returns the i18n message key used when this operation fails.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Operation::Favorite => "notification-favorite-error",
            Operation::Delete => "notification-delete-error",
            Operation::Download => "notification-download-error",
            Operation::Upload => "notification-upload-error",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Favorite => write!(f, "favorite"),
            Operation::Delete => write!(f, "delete"),
            Operation::Download => write!(f, "download"),
            Operation::Upload => write!(f, "upload"),
        }
    }
}

/// Details of a rejected remote mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteMutationError {
    pub operation: Operation,
    pub item_id: ItemId,
    pub cause: String,
}

impl Error {
    /// Wraps a service failure for `operation` on `item_id`.
    pub fn remote(operation: Operation, item_id: ItemId, cause: impl fmt::Display) -> Self {
        Error::RemoteMutation(RemoteMutationError {
            operation,
            item_id,
            cause: cause.to_string(),
        })
    }

    /// Returns the i18n message key for reporting this error to the user.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::RemoteMutation(err) => err.operation.i18n_key(),
            Error::CapabilityDisabled(_) => "notification-capability-disabled",
            Error::Sync(_) => "notification-sync-error",
            Error::Io(_) | Error::Config(_) => "notification-config-load-error",
        }
    }
}

impl fmt::Display for RemoteMutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed for item {}: {}",
            self.operation, self.item_id, self.cause
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::RemoteMutation(e) => write!(f, "Remote Error: {}", e),
            Error::CapabilityDisabled(op) => write!(f, "Operation not enabled: {}", op),
            Error::Sync(e) => write!(f, "Sync Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
