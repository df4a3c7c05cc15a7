//! gridbase - a minimal disk-backed table and matrix engine built around a
//! FIFO page buffer.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          gridbase                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │              Buffer Layer (buffer/)                  │   │
//! │  │   BufferManager: lookup, write-through, invalidation │   │
//! │  │     ┌──────────────────┐  ┌───────────────────┐      │   │
//! │  │     │   Pool (FIFO)    │  │    AccessStats    │      │   │
//! │  │     └──────────────────┘  └───────────────────┘      │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! │                              ↓                              │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │             Storage Layer (storage/)                 │   │
//! │  │    DiskManager + Page codec, one file per page:      │   │
//! │  │    <table>_Page<i> / <matrix>_Page<r>_<c>            │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageKey, Error, config)
//! - [`buffer`] - The bounded FIFO page cache and its accounting
//! - [`storage`] - Disk I/O and the page file format
//!
//! # Quick Start
//! ```no_run
//! use gridbase::BufferManager;
//!
//! # fn main() -> gridbase::Result<()> {
//! let mut bm = BufferManager::with_capacity("data", 8)?;
//!
//! // Write one table page through to disk, then read it back.
//! bm.write_page("inventory", 0, vec![vec![10, 20, 30]], 1)?;
//! let page = bm.get_page("inventory", 0)?;
//! assert_eq!(page.row_count(), 1);
//!
//! println!("{}", bm.access_report());
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod buffer;
pub mod common;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::DEFAULT_POOL_CAPACITY;
pub use common::{Error, PageKey, PageKind, Result};

pub use buffer::{AccessSnapshot, AccessStats, BufferManager, Pool};
pub use storage::page::{Page, PageData, PageHeader, Row};
pub use storage::DiskManager;
