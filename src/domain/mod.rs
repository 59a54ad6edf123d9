// SPDX-License-Identifier: MPL-2.0
//! Domain layer: pure gallery types and rules.
//!
//! # Modules
//!
//! - [`gallery`]: Items, selection scopes and unsynced updates
//!   ([`Item`](gallery::Item), [`SelectionContext`](gallery::SelectionContext),
//!   [`UnsyncedHandle`](gallery::UnsyncedHandle))
//! - [`diagnostics`]: Diagnostics types ([`BufferCapacity`](diagnostics::BufferCapacity))

pub mod diagnostics;
pub mod gallery;
