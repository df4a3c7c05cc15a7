//! Bounded FIFO page pool.
//!
//! [`Pool`] is the resident set behind the buffer manager: a fixed number
//! of pages kept in admission order, evicted strictly first-in-first-out.

use std::collections::{HashMap, VecDeque};

use crate::common::PageKey;
use crate::storage::page::Page;

/// Admission-ordered, capacity-bounded set of resident pages.
///
/// Eviction removes the page that has been resident the longest. Lookups
/// never promote an entry: a page read a hundred times still leaves before
/// a page admitted right after it.
///
/// # Invariants
/// - `order` and `resident` hold exactly the same key set, so membership,
///   fetch, and eviction are all O(1) in the number of resident pages.
/// - `len() <= capacity()` whenever a public method returns.
/// - At most one page per identity.
pub struct Pool {
    /// Keys in admission order (front = oldest, next to evict).
    order: VecDeque<PageKey>,

    /// Resident pages by identity.
    resident: HashMap<PageKey, Page>,

    /// Maximum number of resident pages.
    capacity: usize,
}

impl Pool {
    /// Create a pool holding at most `capacity` pages.
    ///
    /// # Panics
    /// Panics if `capacity` is 0; a pool that cannot admit anything would
    /// turn every admission into an immediate self-eviction.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "pool capacity must be greater than zero");

        Self {
            order: VecDeque::with_capacity(capacity),
            resident: HashMap::with_capacity(capacity),
            capacity,
        }
    }

    /// Look up a resident page.
    ///
    /// This is the single membership-and-fetch step: `Some` is the resident
    /// page, `None` means not resident. There is no separate `contains`
    /// probe to drift out of sync with retrieval.
    pub fn get(&self, key: &PageKey) -> Option<&Page> {
        self.resident.get(key)
    }

    /// Whether a page with `key` is resident.
    pub fn contains(&self, key: &PageKey) -> bool {
        self.resident.contains_key(key)
    }

    /// Admit a page, evicting the oldest resident page first if the pool
    /// is full. Returns the evicted page, if any.
    ///
    /// Re-admitting a resident identity replaces the stored page in place:
    /// no duplicate entry, no change to its admission position, no
    /// eviction.
    pub fn admit(&mut self, page: Page) -> Option<Page> {
        let key = page.key().clone();

        if let Some(slot) = self.resident.get_mut(&key) {
            *slot = page;
            return None;
        }

        // Evict before inserting so residency never exceeds capacity.
        let evicted = if self.resident.len() == self.capacity {
            self.evict_oldest()
        } else {
            None
        };

        self.order.push_back(key.clone());
        self.resident.insert(key, page);

        evicted
    }

    /// Remove and return the earliest-admitted page.
    pub fn evict_oldest(&mut self) -> Option<Page> {
        let key = self.order.pop_front()?;
        let page = self.resident.remove(&key);
        debug_assert!(page.is_some(), "order and resident disagree on {}", key);
        page
    }

    /// Remove the page with `key`, if resident.
    ///
    /// The admission order of the remaining pages is preserved.
    pub fn remove(&mut self, key: &PageKey) -> Option<Page> {
        let page = self.resident.remove(key)?;
        self.order.retain(|k| k != key);
        Some(page)
    }

    /// Drop every resident block of the matrix called `name`, preserving
    /// the relative admission order of everything else.
    ///
    /// Returns the number of pages dropped. Table pages never match, even
    /// when a table shares the matrix's name.
    pub fn remove_matrix_pages(&mut self, name: &str) -> usize {
        let resident = &mut self.resident;
        let before = self.order.len();

        self.order.retain(|key| {
            if key.belongs_to_matrix(name) {
                resident.remove(key);
                false
            } else {
                true
            }
        });

        before - self.order.len()
    }

    /// Drop every resident page.
    pub fn clear(&mut self) {
        self.order.clear();
        self.resident.clear();
    }

    /// Number of resident pages.
    pub fn len(&self) -> usize {
        self.resident.len()
    }

    /// Whether the pool holds no pages.
    pub fn is_empty(&self) -> bool {
        self.resident.is_empty()
    }

    /// Maximum number of resident pages.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Resident keys in admission order (front = next eviction candidate).
    pub fn keys(&self) -> impl Iterator<Item = &PageKey> + '_ {
        self.order.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_page(index: usize) -> Page {
        Page::table("t", index, vec![vec![index as i64]])
    }

    fn matrix_page(matrix: &str, row: usize, col: usize) -> Page {
        Page::matrix(matrix, row, col, vec![row as i64, col as i64])
    }

    fn resident_keys(pool: &Pool) -> Vec<PageKey> {
        pool.keys().cloned().collect()
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than zero")]
    fn test_zero_capacity_panics() {
        Pool::new(0);
    }

    #[test]
    fn test_admit_and_get() {
        let mut pool = Pool::new(4);

        assert!(pool.is_empty());
        assert!(pool.admit(table_page(0)).is_none());

        assert_eq!(pool.len(), 1);
        let page = pool.get(&PageKey::table("t", 0)).unwrap();
        assert_eq!(page.rows().unwrap()[0], vec![0]);
        assert!(pool.get(&PageKey::table("t", 1)).is_none());
    }

    #[test]
    fn test_fifo_eviction_order() {
        let mut pool = Pool::new(2);

        assert!(pool.admit(table_page(0)).is_none());
        assert!(pool.admit(table_page(1)).is_none());

        // Third admission evicts the oldest page, index 0.
        let evicted = pool.admit(table_page(2)).unwrap();
        assert_eq!(evicted.key(), &PageKey::table("t", 0));

        assert_eq!(pool.len(), 2);
        assert_eq!(
            resident_keys(&pool),
            vec![PageKey::table("t", 1), PageKey::table("t", 2)]
        );
    }

    #[test]
    fn test_get_does_not_reorder() {
        let mut pool = Pool::new(2);

        pool.admit(table_page(0));
        pool.admit(table_page(1));

        // Re-reading page 0 must not save it from eviction.
        assert!(pool.get(&PageKey::table("t", 0)).is_some());

        let evicted = pool.admit(table_page(2)).unwrap();
        assert_eq!(evicted.key(), &PageKey::table("t", 0));
    }

    #[test]
    fn test_readmit_replaces_in_place() {
        let mut pool = Pool::new(2);

        pool.admit(table_page(0));
        pool.admit(table_page(1));

        // Same identity, new payload: replaced, not duplicated.
        let replacement = Page::table("t", 0, vec![vec![99]]);
        assert!(pool.admit(replacement).is_none());

        assert_eq!(pool.len(), 2);
        let page = pool.get(&PageKey::table("t", 0)).unwrap();
        assert_eq!(page.rows().unwrap()[0], vec![99]);

        // Admission position unchanged: page 0 is still the oldest.
        let evicted = pool.admit(table_page(2)).unwrap();
        assert_eq!(evicted.key(), &PageKey::table("t", 0));
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut pool = Pool::new(3);

        for i in 0..20 {
            pool.admit(table_page(i));
            assert!(pool.len() <= 3);
        }
        assert_eq!(pool.len(), 3);
        assert_eq!(
            resident_keys(&pool),
            vec![
                PageKey::table("t", 17),
                PageKey::table("t", 18),
                PageKey::table("t", 19)
            ]
        );
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut pool = Pool::new(4);

        pool.admit(table_page(0));
        pool.admit(table_page(1));
        pool.admit(table_page(2));

        let removed = pool.remove(&PageKey::table("t", 1)).unwrap();
        assert_eq!(removed.key(), &PageKey::table("t", 1));
        assert!(pool.remove(&PageKey::table("t", 1)).is_none());

        assert_eq!(
            resident_keys(&pool),
            vec![PageKey::table("t", 0), PageKey::table("t", 2)]
        );
    }

    #[test]
    fn test_remove_matrix_pages() {
        let mut pool = Pool::new(8);

        pool.admit(matrix_page("m", 0, 0));
        pool.admit(table_page(0));
        pool.admit(matrix_page("m", 0, 1));
        pool.admit(matrix_page("other", 0, 0));
        // A table named like the matrix must survive.
        pool.admit(Page::table("m", 5, vec![vec![1]]));

        let dropped = pool.remove_matrix_pages("m");
        assert_eq!(dropped, 2);

        assert_eq!(
            resident_keys(&pool),
            vec![
                PageKey::table("t", 0),
                PageKey::matrix("other", 0, 0),
                PageKey::table("m", 5)
            ]
        );
    }

    #[test]
    fn test_remove_matrix_pages_no_match() {
        let mut pool = Pool::new(2);
        pool.admit(table_page(0));

        assert_eq!(pool.remove_matrix_pages("nothing"), 0);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut pool = Pool::new(2);
        pool.admit(table_page(0));
        pool.admit(matrix_page("m", 0, 0));

        pool.clear();

        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
        assert!(pool.get(&PageKey::table("t", 0)).is_none());

        // Still usable after clearing.
        pool.admit(table_page(7));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_evict_oldest_on_empty() {
        let mut pool = Pool::new(2);
        assert!(pool.evict_oldest().is_none());
    }
}
