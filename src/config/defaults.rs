// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.
//!
//! # Categories
//!
//! - **Gallery**: Timeline date format and selection behavior
//! - **Diagnostics**: Activity buffer capacity

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Default pattern for timeline headings older than yesterday.
pub use crate::application::query::timeline::DEFAULT_DATE_FORMAT;

/// Whether tiles show a selection checkbox by default.
pub const DEFAULT_SELECTABLE: bool = true;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of activity events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum activity buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 100;

/// Maximum activity buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10000;
