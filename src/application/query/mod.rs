// SPDX-License-Identifier: MPL-2.0
//! Query services (read-side operations).
//!
//! - [`timeline`]: Date buckets and display groups for the gallery listing

pub mod timeline;

pub use timeline::{group_by_date, DateBucket, DateBucketer, DisplayGroup, DEFAULT_DATE_FORMAT};
