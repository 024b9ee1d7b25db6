use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FrontierError {
    #[error("container is empty")]
    Empty,

    #[error("key not found: {0}")]
    KeyNotFound(String),
}

pub type Result<T> = std::result::Result<T, FrontierError>;
