//! Buffer management.
//!
//! The buffer layer is the in-memory cache between callers and the
//! file-per-page store. It keeps a bounded set of pages resident and
//! evicts strictly in admission order.
//!
//! # Components
//! - [`BufferManager`] - The main page cache
//! - [`Pool`] - The FIFO-evicting resident set
//! - [`AccessStats`] / [`AccessSnapshot`] - Block traffic accounting

mod buffer_manager;
mod pool;
mod stats;

pub use buffer_manager::BufferManager;
pub use pool::Pool;
pub use stats::{AccessSnapshot, AccessStats};
