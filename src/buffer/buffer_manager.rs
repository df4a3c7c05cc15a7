//! Buffer Manager - the core page caching layer.
//!
//! The [`BufferManager`] provides:
//! - Page lookup by table or matrix identity, served from the pool or disk
//! - FIFO eviction when the pool is full
//! - Write-through persistence that never populates the pool
//! - Matrix invalidation and full pool clearing
//! - Best-effort backing-file deletion
//! - Block access accounting

use std::path::Path;
use std::sync::atomic::Ordering;

use tracing::{debug, trace, warn};

use crate::buffer::{AccessSnapshot, AccessStats, Pool};
use crate::common::config::DEFAULT_POOL_CAPACITY;
use crate::common::{PageKey, Result};
use crate::storage::page::{Page, Row};
use crate::storage::DiskManager;

/// Caches disk pages of tables and matrices with FIFO eviction.
///
/// # Architecture
/// ```text
/// ┌─────────────────────────────────────────────────────────┐
/// │                      BufferManager                      │
/// │  ┌───────────────────────┐  ┌─────────────────────────┐ │
/// │  │      pool: Pool       │  │   disk: DiskManager     │ │
/// │  │ PageKey → Page (FIFO) │  │ <dir>/<name>_Page<...>  │ │
/// │  └───────────────────────┘  └─────────────────────────┘ │
/// │  ┌───────────────────────┐                              │
/// │  │  stats: AccessStats   │                              │
/// │  └───────────────────────┘                              │
/// └─────────────────────────────────────────────────────────┘
/// ```
///
/// # Thread Safety
/// `BufferManager` is **single-threaded**: operations that can change pool
/// residency take `&mut self`, so the compiler serializes them. A caller
/// that needs sharing wraps the whole manager in its own lock.
///
/// # Copy semantics
/// Lookups return an owned [`Page`]. Mutating the returned page never
/// changes what a later lookup of the same identity returns; only
/// [`BufferManager::write_page`] / [`BufferManager::write_matrix_page`]
/// make data visible to future reads.
///
/// # Usage
/// ```no_run
/// use gridbase::BufferManager;
///
/// # fn main() -> gridbase::Result<()> {
/// let mut bm = BufferManager::with_capacity("data/temp", 8)?;
///
/// bm.write_page("orders", 0, vec![vec![1, 2, 3]], 1)?;
/// let page = bm.get_page("orders", 0)?;
/// assert_eq!(page.row_count(), 1);
/// # Ok(())
/// # }
/// ```
pub struct BufferManager {
    /// Bounded FIFO set of resident pages.
    pool: Pool,

    /// Handles all backing-file I/O.
    disk: DiskManager,

    /// Block traffic counters, owned by this instance.
    stats: AccessStats,
}

impl BufferManager {
    /// Open a manager over `dir` with [`DEFAULT_POOL_CAPACITY`].
    ///
    /// Creates `dir` if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::with_capacity(dir, DEFAULT_POOL_CAPACITY)
    }

    /// Open a manager over `dir` holding at most `capacity` cached pages.
    ///
    /// Creates `dir` if it does not exist.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn with_capacity<P: AsRef<Path>>(dir: P, capacity: usize) -> Result<Self> {
        trace!(
            "open buffer manager over {} with capacity {}",
            dir.as_ref().display(),
            capacity
        );
        Ok(Self {
            pool: Pool::new(capacity),
            disk: DiskManager::open(dir)?,
            stats: AccessStats::new(),
        })
    }

    // ========================================================================
    // Public API: Fetch pages
    // ========================================================================

    /// Fetch one page of table `table`.
    ///
    /// A pool hit returns a copy of the cached page. A miss reads the
    /// backing file, admits the page (evicting the oldest resident page if
    /// the pool is full), and returns a copy.
    ///
    /// # Errors
    /// - `Error::PageNotFound` if the backing file does not exist
    /// - `Error::CorruptPage` / `Error::Io` if it cannot be read
    pub fn get_page(&mut self, table: &str, page_index: usize) -> Result<Page> {
        trace!("get_page table {} index {}", table, page_index);
        self.fetch(PageKey::table(table, page_index))
    }

    /// Fetch one block of matrix `matrix`, addressed by block row and
    /// block column.
    ///
    /// Same contract as [`BufferManager::get_page`].
    ///
    /// # Errors
    /// - `Error::PageNotFound` if the backing file does not exist
    /// - `Error::CorruptPage` / `Error::Io` if it cannot be read
    pub fn get_matrix_page(
        &mut self,
        matrix: &str,
        row_block: usize,
        col_block: usize,
    ) -> Result<Page> {
        trace!(
            "get_matrix_page matrix {} block ({}, {})",
            matrix,
            row_block,
            col_block
        );
        self.fetch(PageKey::matrix(matrix, row_block, col_block))
    }

    /// Resolve `key` against the pool, falling back to disk on a miss.
    fn fetch(&mut self, key: PageKey) -> Result<Page> {
        if let Some(page) = self.pool.get(&key) {
            trace!("pool hit for {}", key);
            return Ok(page.clone());
        }

        self.read_through(key)
    }

    /// Pool-miss path: read the backing file, admit the page, hand out a
    /// copy.
    fn read_through(&mut self, key: PageKey) -> Result<Page> {
        debug!("pool miss for {}, reading from disk", key);

        let page = self.disk.read_page(&key)?;
        self.stats.blocks_read.fetch_add(1, Ordering::Relaxed);

        if let Some(evicted) = self.pool.admit(page.clone()) {
            trace!("evicted {} from pool", evicted.key());
        }

        Ok(page)
    }

    // ========================================================================
    // Public API: Write pages
    // ========================================================================

    /// Persist the first `row_count` rows of `rows` as one page of table
    /// `table`.
    ///
    /// The page goes straight to disk and is **not** admitted to the pool;
    /// any stale cached copy of the same identity is dropped. A lookup of
    /// this identity right after a write is therefore always a pool miss
    /// that re-reads the file, regardless of what was cached before.
    ///
    /// `row_count` is clamped to `rows.len()`.
    ///
    /// # Errors
    /// `Error::Io` if the file cannot be written.
    pub fn write_page(
        &mut self,
        table: &str,
        page_index: usize,
        mut rows: Vec<Row>,
        row_count: usize,
    ) -> Result<()> {
        trace!(
            "write_page table {} index {} ({} of {} rows)",
            table,
            page_index,
            row_count.min(rows.len()),
            rows.len()
        );

        rows.truncate(row_count);
        self.write_through(Page::table(table, page_index, rows))
    }

    /// Persist `cells` as one block of matrix `matrix`.
    ///
    /// Same non-caching contract as [`BufferManager::write_page`].
    ///
    /// # Errors
    /// `Error::Io` if the file cannot be written.
    pub fn write_matrix_page(
        &mut self,
        matrix: &str,
        row_block: usize,
        col_block: usize,
        cells: Vec<i64>,
    ) -> Result<()> {
        trace!(
            "write_matrix_page matrix {} block ({}, {})",
            matrix,
            row_block,
            col_block
        );

        self.write_through(Page::matrix(matrix, row_block, col_block, cells))
    }

    /// Persist a transient page and drop any stale resident copy.
    ///
    /// The written page itself is never admitted; the next lookup of this
    /// identity reads the file back.
    fn write_through(&mut self, page: Page) -> Result<()> {
        self.disk.write_page(&page)?;
        self.stats.blocks_written.fetch_add(1, Ordering::Relaxed);

        if self.pool.remove(page.key()).is_some() {
            trace!("dropped stale cached copy of {}", page.key());
        }

        Ok(())
    }

    // ========================================================================
    // Public API: Invalidation
    // ========================================================================

    /// Drop every cached block of matrix `matrix` from the pool.
    ///
    /// Backing files are untouched, and the remaining pages keep their
    /// relative admission order. A table sharing the matrix's name is
    /// unaffected. Returns the number of pages dropped.
    pub fn delete_from_pool(&mut self, matrix: &str) -> usize {
        trace!("delete_from_pool matrix {}", matrix);

        let dropped = self.pool.remove_matrix_pages(matrix);
        debug!("dropped {} cached block(s) of matrix {}", dropped, matrix);

        dropped
    }

    /// Drop every cached page, whatever it belongs to.
    ///
    /// Backing files are untouched; the manager stays usable and the next
    /// lookups re-read from disk.
    pub fn empty_pool(&mut self) {
        trace!("empty_pool ({} page(s) resident)", self.pool.len());
        self.pool.clear();
    }

    // ========================================================================
    // Public API: File deletion
    // ========================================================================

    /// Best-effort deletion of the backing file for `key`.
    ///
    /// Failure (including a missing file) is logged and otherwise ignored.
    /// The pool is not consulted or modified; a resident copy of the page
    /// stays served from the pool until it is evicted or invalidated.
    pub fn delete_file(&self, key: &PageKey) {
        trace!("delete_file {}", key);
        self.delete_named_file(&key.file_name());
    }

    /// Best-effort deletion of the file called `name` in the data
    /// directory.
    ///
    /// Same contract as [`BufferManager::delete_file`], for callers that
    /// know the file only by name.
    pub fn delete_named_file(&self, name: &str) {
        trace!("delete_named_file {}", name);

        match self.disk.remove_named_file(name) {
            Ok(()) => debug!("deleted file {}", name),
            Err(e) => warn!("could not delete file {}: {}", name, e),
        }
    }

    // ========================================================================
    // Public API: Stats and info
    // ========================================================================

    /// Block access counters for this manager.
    pub fn stats(&self) -> &AccessStats {
        &self.stats
    }

    /// Point-in-time copy of the block access counters.
    ///
    /// The `Display` form reports blocks read, blocks written, and their
    /// sum, one per line.
    pub fn access_report(&self) -> AccessSnapshot {
        self.stats.snapshot()
    }

    /// Maximum number of cached pages.
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Number of currently cached pages.
    pub fn cached_page_count(&self) -> usize {
        self.pool.len()
    }

    /// Whether the page with `key` is currently cached.
    pub fn is_cached(&self, key: &PageKey) -> bool {
        self.pool.contains(key)
    }

    /// Cached keys in admission order (front = next eviction candidate).
    pub fn cached_keys(&self) -> Vec<PageKey> {
        self.pool.keys().cloned().collect()
    }

    /// Data directory backing this manager.
    pub fn dir(&self) -> &Path {
        self.disk.dir()
    }
}
