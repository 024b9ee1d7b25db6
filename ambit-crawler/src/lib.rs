pub mod error;
pub mod extract;
pub mod fetch;
pub mod job;
pub mod pool;
pub mod report;

pub use error::{CrawlError, Result};
pub use extract::extract_links;
pub use fetch::PageFetcher;
pub use job::Job;
pub use pool::{Crawler, FrontierKind, WorkQueue};
pub use report::LinkCount;
