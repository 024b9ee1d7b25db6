use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use ambit_frontier::{FifoQueue, Frontier, LifoStack, StablePriorityQueue};
use futures::future::join_all;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{CrawlError, Result};
use crate::extract::extract_links;
use crate::fetch::PageFetcher;
use crate::job::Job;
use crate::report::{LinkCount, most_visited_first};

/// Ordering discipline of the pool's shared frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontierKind {
    #[default]
    Fifo,
    Lifo,
    /// Shorter URLs first, stable among equal lengths.
    Priority,
}

/// The shared frontier plus the pool's join barrier.
///
/// Outstanding work is a counter incremented on every [`put`] and
/// decremented on every [`task_done`]; [`join`] blocks until it
/// returns to zero. Shutdown is an explicit close flag checked by
/// every worker on each pass, never a sentinel job.
///
/// [`put`]: WorkQueue::put
/// [`task_done`]: WorkQueue::task_done
/// [`join`]: WorkQueue::join
pub struct WorkQueue {
    jobs: Mutex<Box<dyn Frontier<Job> + Send>>,
    unfinished: watch::Sender<usize>,
    closed: AtomicBool,
}

impl WorkQueue {
    pub fn new(kind: FrontierKind) -> Self {
        let jobs: Box<dyn Frontier<Job> + Send> = match kind {
            FrontierKind::Fifo => Box::new(FifoQueue::new()),
            FrontierKind::Lifo => Box::new(LifoStack::new()),
            FrontierKind::Priority => Box::new(StablePriorityQueue::new()),
        };
        let (unfinished, _) = watch::channel(0usize);
        Self {
            jobs: Mutex::new(jobs),
            unfinished,
            closed: AtomicBool::new(false),
        }
    }

    /// Enqueues a job and marks one more unit of outstanding work.
    /// The counter moves under the frontier lock, so `join` can never
    /// observe zero while a job is still queued.
    pub async fn put(&self, job: Job) {
        let mut jobs = self.jobs.lock().await;
        jobs.enqueue(job);
        self.unfinished.send_modify(|n| *n += 1);
    }

    /// Pops the next job per discipline, or `None` when the frontier
    /// is currently empty. A popped job still counts as outstanding
    /// until [`task_done`] is called for it.
    ///
    /// [`task_done`]: WorkQueue::task_done
    pub async fn get(&self) -> Option<Job> {
        self.jobs.lock().await.dequeue().ok()
    }

    /// Signals that one dequeued job is fully processed, regardless of
    /// whether it produced children, was skipped, or failed.
    pub fn task_done(&self) {
        self.unfinished.send_modify(|n| *n = n.saturating_sub(1));
    }

    /// Blocks until every enqueued unit of work has been marked done.
    pub async fn join(&self) {
        let mut outstanding = self.unfinished.subscribe();
        // wait_for inspects the current value before sleeping, so an
        // already-drained queue releases immediately.
        let _ = outstanding.wait_for(|n| *n == 0).await;
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Depth-bounded link crawler: N workers draining one shared frontier,
/// feeding discovered links back into it.
pub struct Crawler {
    fetcher: PageFetcher,
    max_depth: usize,
    frontier: FrontierKind,
}

impl Crawler {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            fetcher: PageFetcher::new(timeout_secs),
            max_depth: 2,
            frontier: FrontierKind::default(),
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_frontier(mut self, kind: FrontierKind) -> Self {
        self.frontier = kind;
        self
    }

    /// Crawls outward from `start_url` with `workers` concurrent
    /// tasks. Returns visit counts most-visited first; whatever was
    /// discovered is reported even when individual fetches failed.
    pub async fn crawl(&self, start_url: &str, workers: usize) -> Result<Vec<LinkCount>> {
        Url::parse(start_url).map_err(|e| CrawlError::InvalidUrl(format!("{start_url}: {e}")))?;
        info!("Starting crawl of {} with {} workers", start_url, workers);

        let queue = Arc::new(WorkQueue::new(self.frontier));
        let links: Arc<Mutex<HashMap<String, u64>>> = Arc::new(Mutex::new(HashMap::new()));
        queue.put(Job::new(start_url, 0)).await;

        let mut handles = Vec::new();
        for worker_id in 0..workers.max(1) {
            let queue = queue.clone();
            let links = links.clone();
            let fetcher = self.fetcher.clone();
            let max_depth = self.max_depth;
            handles.push(tokio::spawn(async move {
                debug!("Worker {} started", worker_id);
                worker_loop(worker_id, queue, links, fetcher, max_depth).await;
                debug!("Worker {} finished", worker_id);
            }));
        }

        queue.join().await;
        queue.close();
        for joined in join_all(handles).await {
            joined?;
        }

        let links = links.lock().await;
        let counts: Vec<LinkCount> = links
            .iter()
            .map(|(url, &visits)| LinkCount {
                url: url.clone(),
                visits,
            })
            .collect();
        info!("Crawl complete. {} distinct URLs", counts.len());
        Ok(most_visited_first(counts))
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}

async fn worker_loop(
    worker_id: usize,
    queue: Arc<WorkQueue>,
    links: Arc<Mutex<HashMap<String, u64>>>,
    fetcher: PageFetcher,
    max_depth: usize,
) {
    loop {
        if queue.is_closed() {
            break;
        }
        let Some(job) = queue.get().await else {
            // Empty frontier is not completion: other workers may
            // still be expanding. Poll again shortly; close() is what
            // ends the loop.
            tokio::time::sleep(Duration::from_millis(10)).await;
            continue;
        };

        {
            let mut links = links.lock().await;
            *links.entry(job.url.clone()).or_insert(0) += 1;
        }
        debug!("Worker {} depth={} url={}", worker_id, job.depth, job.url);

        // Children are spawned only strictly below the bound, so jobs
        // at depth == max_depth are counted but never fetched.
        if job.depth < max_depth {
            match fetcher.fetch(&job.url).await {
                Ok(Some(html)) => {
                    for link in extract_links(&job.url, &html) {
                        queue.put(Job::new(link, job.depth + 1)).await;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("Worker {} failed at {}: {}", worker_id, job.url, e);
                }
            }
        }

        // Exactly one completion signal per dequeue, on every path,
        // or join() would hang forever.
        queue.task_done();
    }
}
