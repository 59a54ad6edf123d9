// SPDX-License-Identifier: MPL-2.0
//! Activity diagnostics for the gallery.
//!
//! User actions and operation failures are captured into a memory-bounded
//! ring buffer and can be exported as a JSON report.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped activity event
//! - [`DiagnosticsHandle`]: Non-blocking sender shared with async mutations
//! - [`DiagnosticsCollector`]: Owner of the buffer

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, ErrorEvent, UserAction};
