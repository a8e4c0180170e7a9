use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Counter '{id}' not found")]
    NotFound { id: String },

    #[error("Counter title must not be empty")]
    EmptyTitle,
}

/// Failure of a use-case invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UseCaseError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Failed(String),
}
