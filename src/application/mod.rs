// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports and queries.
//!
//! - [`port`]: Trait definitions for the services the gallery depends on
//! - [`query`]: Read-only operations on domain data (timeline grouping)
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Service adapters implement application layer ports
//! - The UI layer uses application layer services

pub mod port;
pub mod query;
