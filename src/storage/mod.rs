//! Storage layer - disk I/O and page formats.
//!
//! This module handles persistent storage:
//! - [`DiskManager`] - File-per-page I/O rooted at a data directory
//! - [`page`] - Page types and the on-disk codec

mod disk_manager;
pub mod page;

pub use disk_manager::DiskManager;
