// SPDX-License-Identifier: MPL-2.0
//! Collector that aggregates gallery activity events into a ring buffer.

use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Serialize;

use super::{
    BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind, ErrorEvent, UserAction,
};
use crate::error::Operation;

/// Handle for sending events to the collector.
///
/// Cheap to clone and shareable across threads, so mutation futures can log
/// their outcome after the viewer has closed. Sends never block: events are
/// dropped when the channel is full.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    pub fn log_action(&self, action: UserAction) {
        self.log_action_with_details(action, None);
    }

    pub fn log_action_with_details(&self, action: UserAction, details: Option<String>) {
        let event = DiagnosticEvent::new(DiagnosticEventKind::UserAction { action, details });
        let _ = self.event_tx.try_send(event);
    }

    pub fn log_warning(&self, message: impl Into<String>) {
        let event = DiagnosticEvent::new(DiagnosticEventKind::Warning {
            message: message.into(),
        });
        let _ = self.event_tx.try_send(event);
    }

    pub fn log_error(&self, operation: Option<Operation>, message: impl Into<String>) {
        let event = DiagnosticEvent::new(DiagnosticEventKind::Error {
            event: ErrorEvent::new(operation, message),
        });
        let _ = self.event_tx.try_send(event);
    }
}

/// Central store for activity events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    collection_started_at: Instant,
    collection_started_at_utc: DateTime<Utc>,
}

/// Channel slack between handles and the next `process_pending` call.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

#[derive(Debug, Serialize)]
struct ActivityReport<'a> {
    started_at: DateTime<Utc>,
    duration_ms: u64,
    event_count: usize,
    events: Vec<ReportedEvent<'a>>,
}

#[derive(Debug, Serialize)]
struct ReportedEvent<'a> {
    /// Milliseconds since collection started.
    offset_ms: u64,
    #[serde(flatten)]
    kind: &'a DiagnosticEventKind,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the channel into the buffer. Call once per update.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns stored events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Exports the buffered events as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    #[allow(clippy::cast_possible_truncation)] // Millisecond offsets fit in u64
    pub fn export_json(&self) -> serde_json::Result<String> {
        let events: Vec<ReportedEvent<'_>> = self
            .buffer
            .iter()
            .map(|event| ReportedEvent {
                offset_ms: event
                    .timestamp
                    .saturating_duration_since(self.collection_started_at)
                    .as_millis() as u64,
                kind: &event.kind,
            })
            .collect();

        let report = ActivityReport {
            started_at: self.collection_started_at_utc,
            duration_ms: self.collection_started_at.elapsed().as_millis() as u64,
            event_count: events.len(),
            events,
        };
        serde_json::to_string_pretty(&report)
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_events_arrive_after_processing() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log_action(UserAction::ToggleFavorite);
        assert!(collector.is_empty());

        collector.process_pending();
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn handle_works_across_threads() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        std::thread::spawn(move || handle.log_error(Some(Operation::Delete), "rejected"))
            .join()
            .expect("logging thread panicked");
        collector.process_pending();

        let event = collector.iter().next().expect("one event");
        assert_eq!(
            event.kind,
            DiagnosticEventKind::Error {
                event: ErrorEvent::new(Some(Operation::Delete), "rejected"),
            }
        );
    }

    #[test]
    fn full_channel_drops_events_without_blocking() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        for _ in 0..DEFAULT_CHANNEL_CAPACITY + 20 {
            handle.log_warning("noise");
        }
        collector.process_pending();

        assert_eq!(collector.len(), DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn buffer_evicts_beyond_capacity() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(0));
        let handle = collector.handle();
        for _ in 0..3 {
            for _ in 0..50 {
                handle.log_action(UserAction::CloseViewer);
            }
            collector.process_pending();
        }
        assert_eq!(collector.len(), collector.capacity());
        assert_eq!(collector.capacity(), 100);
    }

    #[test]
    fn export_json_lists_events_in_order() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();
        handle.log_action(UserAction::OpenViewer { index: 4 });
        handle.log_action(UserAction::CloseViewer);
        collector.process_pending();

        let json = collector.export_json().expect("export should succeed");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["event_count"], 2);
        assert_eq!(value["events"][0]["action"]["action"], "open_viewer");
        assert_eq!(value["events"][0]["action"]["index"], 4);
        assert_eq!(value["events"][1]["action"]["action"], "close_viewer");
    }
}
