use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::marker::PhantomData;

use crate::error::{FrontierError, Result};

/// An ordered container of pending work. The three disciplines (FIFO,
/// LIFO, stable priority) share this consumer contract; only the
/// insertion/extraction rule differs.
pub trait Frontier<T> {
    fn enqueue(&mut self, item: T);

    /// Removes and returns the head per discipline. Fails with
    /// [`FrontierError::Empty`] when no elements remain.
    fn dequeue(&mut self) -> Result<T>;

    /// Returns the head without removing it.
    fn peek(&self) -> Result<&T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Draining iteration: repeatedly dequeues until the container is
    /// empty. Not idempotent - a second pass over the same instance
    /// yields nothing unless it has been re-populated.
    fn drain(&mut self) -> Drain<'_, T, Self>
    where
        Self: Sized,
    {
        Drain {
            frontier: self,
            _item: PhantomData,
        }
    }
}

pub struct Drain<'a, T, F: Frontier<T>> {
    frontier: &'a mut F,
    _item: PhantomData<T>,
}

impl<T, F: Frontier<T>> Iterator for Drain<'_, T, F> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.frontier.dequeue().ok()
    }
}

/// First-in first-out: output order equals input order.
#[derive(Debug, Default)]
pub struct FifoQueue<T> {
    elements: VecDeque<T>,
}

impl<T> FifoQueue<T> {
    pub fn new() -> Self {
        Self {
            elements: VecDeque::new(),
        }
    }
}

impl<T> Frontier<T> for FifoQueue<T> {
    fn enqueue(&mut self, item: T) {
        self.elements.push_back(item);
    }

    fn dequeue(&mut self) -> Result<T> {
        self.elements.pop_front().ok_or(FrontierError::Empty)
    }

    fn peek(&self) -> Result<&T> {
        self.elements.front().ok_or(FrontierError::Empty)
    }

    fn len(&self) -> usize {
        self.elements.len()
    }
}

/// Last-in first-out: output order is the exact reverse of input order.
#[derive(Debug, Default)]
pub struct LifoStack<T> {
    elements: VecDeque<T>,
}

impl<T> LifoStack<T> {
    pub fn new() -> Self {
        Self {
            elements: VecDeque::new(),
        }
    }

    /// Mutable access to the top element. The depth-first traversal
    /// advances the cursor of its top stack frame in place.
    pub fn peek_mut(&mut self) -> Result<&mut T> {
        self.elements.back_mut().ok_or(FrontierError::Empty)
    }
}

impl<T> Frontier<T> for LifoStack<T> {
    fn enqueue(&mut self, item: T) {
        self.elements.push_back(item);
    }

    fn dequeue(&mut self) -> Result<T> {
        self.elements.pop_back().ok_or(FrontierError::Empty)
    }

    fn peek(&self) -> Result<&T> {
        self.elements.back().ok_or(FrontierError::Empty)
    }

    fn len(&self) -> usize {
        self.elements.len()
    }
}

/// Items that carry their own priority, for use with
/// [`StablePriorityQueue`] through the [`Frontier`] trait.
pub trait PriorityKey {
    fn priority(&self) -> i64;
}

#[derive(Debug)]
struct Entry<T> {
    priority: i64,
    seq: u64,
    value: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Max-heap order: highest priority wins, equal priorities fall back
    // to lowest insertion sequence. This is the stability invariant -
    // ties never reorder relative to insertion.
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority discipline: higher priority dequeues first; equal
/// priorities dequeue in insertion order, keyed by a monotonically
/// increasing sequence counter.
#[derive(Debug)]
pub struct StablePriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    seq: u64,
}

impl<T> StablePriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub fn enqueue_with_priority(&mut self, priority: i64, value: T) {
        let entry = Entry {
            priority,
            seq: self.seq,
            value,
        };
        self.seq += 1;
        self.heap.push(entry);
    }
}

impl<T> Default for StablePriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PriorityKey> Frontier<T> for StablePriorityQueue<T> {
    fn enqueue(&mut self, item: T) {
        let priority = item.priority();
        self.enqueue_with_priority(priority, item);
    }

    fn dequeue(&mut self) -> Result<T> {
        self.heap
            .pop()
            .map(|entry| entry.value)
            .ok_or(FrontierError::Empty)
    }

    fn peek(&self) -> Result<&T> {
        self.heap
            .peek()
            .map(|entry| &entry.value)
            .ok_or(FrontierError::Empty)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct Task(&'static str, i64);

    impl PriorityKey for Task {
        fn priority(&self) -> i64 {
            self.1
        }
    }

    #[test]
    fn fifo_preserves_input_order() {
        let mut queue = FifoQueue::new();
        for n in 0..5 {
            queue.enqueue(n);
        }
        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn lifo_reverses_input_order() {
        let mut stack = LifoStack::new();
        for n in 0..5 {
            stack.enqueue(n);
        }
        let drained: Vec<_> = stack.drain().collect();
        assert_eq!(drained, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn dequeue_on_empty_fails() {
        let mut queue: FifoQueue<u8> = FifoQueue::new();
        assert_eq!(queue.dequeue(), Err(FrontierError::Empty));
        assert_eq!(queue.peek(), Err(FrontierError::Empty));
    }

    #[test]
    fn peek_does_not_remove() {
        let mut queue = FifoQueue::new();
        queue.enqueue("a");
        assert_eq!(queue.peek(), Ok(&"a"));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dequeue(), Ok("a"));
    }

    #[test]
    fn drain_is_not_idempotent() {
        let mut queue = FifoQueue::new();
        queue.enqueue(1);
        queue.enqueue(2);
        assert_eq!(queue.drain().count(), 2);
        assert_eq!(queue.drain().count(), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn higher_priority_dequeues_first() {
        let mut queue = StablePriorityQueue::new();
        queue.enqueue(Task("low", 1));
        queue.enqueue(Task("high", 10));
        queue.enqueue(Task("mid", 5));
        assert_eq!(queue.dequeue(), Ok(Task("high", 10)));
        assert_eq!(queue.dequeue(), Ok(Task("mid", 5)));
        assert_eq!(queue.dequeue(), Ok(Task("low", 1)));
    }

    #[test]
    fn equal_priorities_keep_insertion_order() {
        let mut queue = StablePriorityQueue::new();
        queue.enqueue(Task("first", 3));
        queue.enqueue(Task("second", 3));
        queue.enqueue(Task("third", 3));
        let order: Vec<_> = queue.drain().map(|t| t.0).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn stability_holds_among_mixed_priorities() {
        let mut queue = StablePriorityQueue::new();
        queue.enqueue_with_priority(2, "a");
        queue.enqueue_with_priority(1, "b");
        queue.enqueue_with_priority(2, "c");
        queue.enqueue_with_priority(1, "d");
        let order: Vec<_> = std::iter::from_fn(|| queue.heap.pop().map(|e| e.value)).collect();
        assert_eq!(order, vec!["a", "c", "b", "d"]);
    }
}
