// SPDX-License-Identifier: MPL-2.0
//! `gallery_frame` is the selection and viewer core of a photo gallery grid.
//!
//! It keeps a scoped multi-selection with anchor-based range gestures, groups
//! items under date headings, and coordinates a full-screen viewer whose
//! favorite, delete, download and edit actions are relayed to remote services.
//! Rendering and the services themselves are supplied by the host through the
//! traits in [`application::port`].

#![doc(html_root_url = "https://docs.rs/gallery_frame/0.1.0")]

pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod ui;

#[cfg(test)]
mod test_utils;
