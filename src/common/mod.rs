//! Common types and utilities shared across gridbase.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - Page identity (PageKey, PageKind)

pub mod config;
pub mod error;
mod page_key;

pub use error::{Error, Result};
pub use page_key::{PageKey, PageKind};
