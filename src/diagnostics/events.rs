// SPDX-License-Identifier: MPL-2.0
//! Gallery activity events.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::Operation;

/// User-initiated gallery actions captured for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    // ==========================================================================
    // Selection Actions
    // ==========================================================================
    /// Select or deselect a single tile.
    SelectItem { selected: bool },

    /// Apply a modifier-held range selection.
    RangeSelect {
        /// Number of tiles whose state changed.
        affected: usize,
        selected: bool,
    },

    /// Select or clear every tile of one date group.
    SelectGroup { selected: bool },

    ClearSelection,

    // ==========================================================================
    // Viewer Actions
    // ==========================================================================
    OpenViewer { index: usize },

    CloseViewer,

    ToggleFavorite,

    DeleteItem,

    DownloadItem,

    /// Hand an edited copy to the upload pipeline.
    SaveEditedCopy,

    /// Request a full remote resync.
    TriggerSync,
}

/// A failed operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEvent {
    /// The mutation that failed, if the failure came from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
    pub message: String,
}

impl ErrorEvent {
    #[must_use]
    pub fn new(operation: Option<Operation>, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock)
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and data of a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    UserAction {
        action: UserAction,
        /// Optional context such as the item id.
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    /// Non-critical issue, e.g. a warning toast.
    Warning { message: String },

    Error { event: ErrorEvent },
}
