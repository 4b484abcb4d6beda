use sea_orm::DbErr;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors that can occur in the service layer
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    /// Stored rows break an invariant the loader relies on (e.g. a reply without author).
    #[error("Data integrity violation: {0}")]
    Integrity(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}
