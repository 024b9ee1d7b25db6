use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{FrontierError, Result};

#[derive(Debug)]
struct IndexEntry<K> {
    priority: i64,
    seq: u64,
    key: K,
}

impl<K> PartialEq for IndexEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<K> Eq for IndexEntry<K> {}

impl<K> PartialOrd for IndexEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for IndexEntry<K> {
    // Min-heap order via std::cmp::Reverse at the call sites: lowest
    // (priority, seq) dequeues first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-priority structure indexed by a unique key, supporting
/// priority updates in place.
///
/// Updates use lazy stale-entry skipping: each [`set_priority`] pushes
/// a fresh heap entry and bumps the key's live version; [`dequeue`]
/// discards entries whose version no longer matches. Amortized
/// O(log n) per update, versus the O(n) full re-heapify alternative.
///
/// [`set_priority`]: MutablePriorityIndex::set_priority
/// [`dequeue`]: MutablePriorityIndex::dequeue
#[derive(Debug)]
pub struct MutablePriorityIndex<K> {
    live: HashMap<K, (i64, u64)>,
    heap: BinaryHeap<std::cmp::Reverse<IndexEntry<K>>>,
    seq: u64,
}

impl<K> MutablePriorityIndex<K>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self {
            live: HashMap::new(),
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Inserts `key` with `priority`, or updates the priority of an
    /// existing key. A subsequent [`dequeue`] honors the update.
    ///
    /// [`dequeue`]: MutablePriorityIndex::dequeue
    pub fn set_priority(&mut self, key: K, priority: i64) {
        let seq = self.seq;
        self.seq += 1;
        self.live.insert(key.clone(), (priority, seq));
        self.heap
            .push(std::cmp::Reverse(IndexEntry { priority, seq, key }));
    }

    pub fn get_priority(&self, key: &K) -> Result<i64> {
        self.live
            .get(key)
            .map(|&(priority, _)| priority)
            .ok_or_else(|| FrontierError::KeyNotFound(format!("{key:?}")))
    }

    /// Pops and returns the key with the lexicographically lowest
    /// `(priority, seq)` pair, skipping entries superseded by a later
    /// [`set_priority`].
    ///
    /// [`set_priority`]: MutablePriorityIndex::set_priority
    pub fn dequeue(&mut self) -> Result<K> {
        while let Some(std::cmp::Reverse(entry)) = self.heap.pop() {
            match self.live.get(&entry.key) {
                Some(&(priority, seq)) if priority == entry.priority && seq == entry.seq => {
                    self.live.remove(&entry.key);
                    return Ok(entry.key);
                }
                // Stale entry from before an update, or the key has
                // already been dequeued.
                _ => continue,
            }
        }
        Err(FrontierError::Empty)
    }

    /// Number of live keys, not heap slots.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.live.contains_key(key)
    }

    /// Draining iteration in priority order; the index is empty once
    /// the iterator is exhausted.
    pub fn drain(&mut self) -> impl Iterator<Item = K> + '_ {
        std::iter::from_fn(move || self.dequeue().ok())
    }
}

impl<K> Default for MutablePriorityIndex<K>
where
    K: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
