use ambit_frontier::PriorityKey;

/// A unit of pending crawl work: a target URL plus the depth at which
/// it was discovered. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Job {
    pub url: String,
    pub depth: usize,
}

impl Job {
    pub fn new(url: impl Into<String>, depth: usize) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }
}

impl PriorityKey for Job {
    // Shorter URLs dequeue first in priority mode; equal lengths fall
    // back to the queue's insertion order.
    fn priority(&self) -> i64 {
        -(self.url.len() as i64)
    }
}
