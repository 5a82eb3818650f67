//! Min-priority queue shared by every search algorithm
//!
//! Thin wrapper over `BinaryHeap` with reversed ordering. Equal priorities
//! pop in insertion order, so a given query always returns the same path.
//! There is no decrease-key: callers re-insert with the better priority and
//! discard stale pops against their closed set.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

#[derive(Debug)]
struct Entry<T> {
    priority: OrderedFloat<f64>,
    seq: u64,
    item: T,
}

impl<T> Eq for Entry<T> {}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue with FIFO tie-breaking
#[derive(Debug)]
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn insert(&mut self, item: T, priority: f64) {
        self.heap.push(Entry {
            priority: OrderedFloat(priority),
            seq: self.next_seq,
            item,
        });
        self.next_seq += 1;
    }

    /// Remove and return the item with the lowest priority
    pub fn extract_min(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_priority_order() {
        let mut queue = PriorityQueue::new();
        queue.insert("c", 3.0);
        queue.insert("a", 1.0);
        queue.insert("b", 2.0);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.extract_min(), Some("a"));
        assert_eq!(queue.extract_min(), Some("b"));
        assert_eq!(queue.extract_min(), Some("c"));
        assert_eq!(queue.extract_min(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ties_are_fifo() {
        let mut queue = PriorityQueue::new();
        for i in 0..5 {
            queue.insert(i, 1.0);
        }
        queue.insert(99, 0.5);

        let order: Vec<i32> = std::iter::from_fn(|| queue.extract_min()).collect();
        assert_eq!(order, vec![99, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_reinsertion_keeps_both_entries() {
        // Stale entries are the caller's concern; the queue keeps every insert.
        let mut queue = PriorityQueue::new();
        queue.insert('x', 5.0);
        queue.insert('y', 3.0);
        queue.insert('x', 2.0);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.extract_min(), Some('x'));
        assert_eq!(queue.extract_min(), Some('y'));
        assert_eq!(queue.extract_min(), Some('x'));
    }

    #[test]
    fn test_nan_priority_does_not_panic() {
        let mut queue = PriorityQueue::new();
        queue.insert(1, f64::NAN);
        queue.insert(2, 0.0);
        assert_eq!(queue.extract_min(), Some(2));
        assert_eq!(queue.extract_min(), Some(1));
    }
}
