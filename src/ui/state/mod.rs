// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! Grid state kept apart from the frame that renders it.

pub mod modifier;
pub mod selection;

pub use modifier::ModifierKeyTracker;
pub use selection::{RangeOutcome, RangeSkip, SelectionState, SelectionStore};
