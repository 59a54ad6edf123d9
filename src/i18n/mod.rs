// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! Timeline headings and notification messages are resolved through Fluent
//! bundles embedded from `assets/i18n/`.
//!
//! # Features
//!
//! - Locale resolution from an explicit override, the config file, or the OS
//! - Fallback to `en-US` when no translation matches
//! - Mapping of the UI language to a date formatting locale

pub mod fluent;

pub use fluent::{date_locale_for, I18n};
