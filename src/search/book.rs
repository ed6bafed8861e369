//! Transposition book keyed by exact position fingerprints.
//!
//! Entries are only written for searches at or beyond `save_depth`, and a
//! stored entry is only ever replaced by a strictly deeper computation.

use std::collections::HashMap;
use std::hash::Hash;

use crate::search::best_move::BestMove;

pub const DEFAULT_SAVE_DEPTH: u32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    pub replacements: u64,
}

#[derive(Debug, Clone)]
pub struct Book<K, M> {
    entries: HashMap<K, BestMove<M>>,
    save_depth: u32,
    stats: BookStats,
}

impl<K: Eq + Hash, M: Clone> Default for Book<K, M> {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_DEPTH)
    }
}

impl<K: Eq + Hash, M: Clone> Book<K, M> {
    pub fn new(save_depth: u32) -> Self {
        Self {
            entries: HashMap::new(),
            save_depth,
            stats: BookStats::default(),
        }
    }

    #[inline]
    pub fn save_depth(&self) -> u32 {
        self.save_depth
    }

    #[inline]
    pub fn set_save_depth(&mut self, save_depth: u32) {
        self.save_depth = save_depth;
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = BookStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> BookStats {
        self.stats
    }

    /// Peek at an entry without touching the statistics.
    pub fn get(&self, key: &K) -> Option<&BestMove<M>> {
        self.entries.get(key)
    }

    /// Cached result for `key` if it was computed at least `depth` deep.
    pub fn probe(&mut self, key: &K, depth: u32) -> Option<BestMove<M>> {
        self.stats.probes += 1;
        let hit = self
            .entries
            .get(key)
            .filter(|entry| entry.depth >= depth)
            .cloned();
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    /// Insert `result` if absent, or replace a strictly shallower entry.
    /// Returns whether the book changed.
    pub fn store(&mut self, key: K, result: &BestMove<M>) -> bool {
        if result.depth < self.save_depth || result.window_collision {
            return false;
        }
        match self.entries.get_mut(&key) {
            None => {
                self.entries.insert(key, result.clone());
                self.stats.stores += 1;
                true
            }
            Some(existing) if existing.depth < result.depth => {
                *existing = result.clone();
                self.stats.stores += 1;
                self.stats.replacements += 1;
                true
            }
            Some(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, BookStats};
    use crate::search::best_move::BestMove;

    fn result(depth: u32, value: i64) -> BestMove<&'static str> {
        BestMove {
            value,
            best_move: Some("m"),
            best_reply: None,
            depth,
            boards_explored: 10,
            window_collision: false,
        }
    }

    #[test]
    fn probe_respects_stored_depth() {
        let mut book = Book::new(1);
        assert!(book.store(7u32, &result(3, 42)));
        assert_eq!(book.probe(&7, 3).map(|r| r.value), Some(42));
        assert_eq!(book.probe(&7, 2).map(|r| r.value), Some(42));
        assert!(book.probe(&7, 4).is_none());
        assert!(book.probe(&8, 1).is_none());
        assert_eq!(
            book.stats(),
            BookStats {
                probes: 4,
                hits: 2,
                stores: 1,
                replacements: 0,
            }
        );
    }

    #[test]
    fn shallower_results_never_replace_deeper_ones() {
        let mut book = Book::new(1);
        book.store(1u32, &result(4, 10));
        assert!(!book.store(1, &result(3, 99)));
        assert!(!book.store(1, &result(4, 99)));
        assert_eq!(book.get(&1).map(|r| r.value), Some(10));

        assert!(book.store(1, &result(5, 77)));
        assert_eq!(book.get(&1).map(|r| (r.depth, r.value)), Some((5, 77)));
        assert_eq!(book.stats().replacements, 1);
    }

    #[test]
    fn below_save_depth_and_collisions_are_ignored() {
        let mut book = Book::new(2);
        assert!(!book.store(1u32, &result(1, 5)));
        let mut collided = result(6, 5);
        collided.window_collision = true;
        assert!(!book.store(1, &collided));
        assert!(book.is_empty());
    }

    #[test]
    fn clear_drops_entries_and_stats() {
        let mut book = Book::default();
        book.store(1u32, &result(2, 1));
        book.probe(&1, 1);
        book.clear();
        assert_eq!(book.len(), 0);
        assert_eq!(book.stats(), BookStats::default());
        assert_eq!(book.save_depth(), 2);
    }
}
