pub mod dijkstra;
pub mod error;
pub mod model;
pub mod traverse;

pub use dijkstra::dijkstra_path;
pub use error::{Result, TraverseError};
pub use model::Place;
pub use traverse::{BfsIter, DfsIter, bfs, bfs_ordered, dfs, dfs_ordered, shortest_path};
