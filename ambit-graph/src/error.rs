use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TraverseError {
    /// Path reconstruction hit a gap in the predecessor map before
    /// reaching the source. The search terminated inconsistently; this
    /// is not the same as an unreachable destination.
    #[error("predecessor chain broke before reaching the source")]
    NoPathFound,
}

pub type Result<T> = std::result::Result<T, TraverseError>;
