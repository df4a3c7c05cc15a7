//! Page types and layout.
//!
//! This module contains:
//! - [`Page`] - Identity plus decoded payload, with the byte codec
//! - [`PageData`] / [`Row`] - Payload shapes
//! - [`PageHeader`] - Metadata at the start of every page file

#[allow(clippy::module_inception)]
mod page;
mod page_header;

pub use page::{Page, PageData, Row};
pub use page_header::{HeaderError, PageHeader};
