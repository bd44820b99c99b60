use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("malformed path (length must be a multiple of {expected}): {path:?}")]
    MalformedPath { path: String, expected: usize },

    #[error("malformed node id (expected {expected} ascii characters): {token:?}")]
    MalformedId { token: String, expected: usize },

    #[error("path does not resolve: {0:?}")]
    PathNotFound(String),

    #[error("the root node cannot be deleted")]
    RootNotDeletable,
}

pub type TreeResult<T> = Result<T, TreeError>;
