// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! exposes a `Message` enum and an `update` returning an `Effect` for its
//! parent plus an Iced `Task`.
//!
//! - [`gallery`] - Gallery grid frame, tiles and date groups
//! - [`viewer`] - Full-screen viewer coordination and remote mutations
//! - [`state`] - Selection store and held-modifier tracking
//! - [`notifications`] - Toast notification system for user feedback

pub mod gallery;
pub mod notifications;
pub mod state;
pub mod viewer;
