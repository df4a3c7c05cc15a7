//! Block access accounting.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Disk block traffic counters for one buffer manager.
///
/// Each manager owns its counters; two managers over the same directory
/// never share accounting. Counters only ever grow for the lifetime of the
/// manager.
///
/// A read is counted once per completed pool miss, table and matrix pages
/// alike; a write is counted once per page persisted. Pool hits touch no
/// counter, and a failed read or write counts nothing.
///
/// # Memory Ordering
/// We use `Ordering::Relaxed` for all operations because:
/// - We only need atomicity (no partial updates)
/// - We don't need synchronization between different counters
/// - Counters are only ever summed for reporting
///
/// # Example
/// ```
/// use gridbase::AccessStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = AccessStats::new();
/// stats.blocks_read.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.blocks_read.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug)]
pub struct AccessStats {
    /// Number of blocks read from disk.
    pub blocks_read: AtomicU64,

    /// Number of blocks written to disk.
    pub blocks_written: AtomicU64,
}

impl AccessStats {
    /// Create a new tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            blocks_read: AtomicU64::new(0),
            blocks_written: AtomicU64::new(0),
        }
    }

    /// Get a snapshot of the current counters.
    ///
    /// This returns a non-atomic copy for display/logging.
    pub fn snapshot(&self) -> AccessSnapshot {
        AccessSnapshot {
            blocks_read: self.blocks_read.load(Ordering::Relaxed),
            blocks_written: self.blocks_written.load(Ordering::Relaxed),
        }
    }
}

impl Default for AccessStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of [`AccessStats`].
///
/// Unlike `AccessStats`, this is not atomic and can be safely printed,
/// compared, and subtracted by callers measuring one operation.
///
/// # Example
/// ```
/// use gridbase::AccessStats;
///
/// let stats = AccessStats::new();
/// // ... run some page traffic ...
/// let snapshot = stats.snapshot();
/// println!("{}", snapshot); // Can print safely
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessSnapshot {
    pub blocks_read: u64,
    pub blocks_written: u64,
}

impl AccessSnapshot {
    /// Total blocks touched on disk, reads plus writes.
    pub fn blocks_accessed(&self) -> u64 {
        self.blocks_read + self.blocks_written
    }
}

impl fmt::Display for AccessSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of blocks read: {}", self.blocks_read)?;
        writeln!(f, "Number of blocks written: {}", self.blocks_written)?;
        write!(f, "Number of blocks accessed: {}", self.blocks_accessed())
    }
}
