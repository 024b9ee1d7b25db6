pub mod error;
pub mod index;
pub mod queue;

pub use error::{FrontierError, Result};
pub use index::MutablePriorityIndex;
pub use queue::{FifoQueue, Frontier, LifoStack, PriorityKey, StablePriorityQueue};
