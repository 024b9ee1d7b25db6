use serde::{Deserialize, Serialize};

/// One row of a crawl summary: a URL and how many times workers
/// dequeued it. Revisits are expected and counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCount {
    pub url: String,
    pub visits: u64,
}

/// Orders counts most-visited first, ties alphabetically by URL so the
/// output is stable.
pub fn most_visited_first(mut counts: Vec<LinkCount>) -> Vec<LinkCount> {
    counts.sort_by(|a, b| b.visits.cmp(&a.visits).then_with(|| a.url.cmp(&b.url)));
    counts
}
