//! Configuration constants for gridbase.

/// Default number of pages the buffer pool keeps resident.
///
/// The engine targets datasets far larger than memory, so the default pool
/// is tiny and the eviction path runs constantly instead of only under
/// pressure. With the default, any scan touching three or more distinct
/// pages evicts on every step.
///
/// Callers that want a larger cache pass an explicit capacity to
/// `BufferManager::with_capacity`.
pub const DEFAULT_POOL_CAPACITY: usize = 2;
