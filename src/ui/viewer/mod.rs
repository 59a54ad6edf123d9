// SPDX-License-Identifier: MPL-2.0
//! Full-screen viewer coordination.
//!
//! Rendering and in-viewer navigation belong to the host; this module keeps
//! the open/closed state and relays favorite, delete, download and edit
//! requests to the remote services.

pub mod coordinator;

pub use coordinator::{Capabilities, ViewerCoordinator, ViewerServices, ViewerState};
