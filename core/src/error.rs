use thiserror::Error;

/// Result type alias for roster operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error types for the task/user roster engine.
///
/// These errors cover all failure modes of a synchronizing write or a
/// projection read, from payload validation to transaction lifecycle
/// failures. Each variant maps to an HTTP-style status code for the
/// response envelope.
///
/// # Examples
///
/// ```rust
/// use roster_core::error::StoreError;
///
/// let not_found = StoreError::not_found_task(42);
/// assert!(not_found.is_not_found());
/// assert_eq!(not_found.status_code(), 404);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Entity not found by the given identifier
    #[error("Not found: {0}")]
    NotFound(String),

    /// Payload failed validation before any write was attempted
    #[error("Validation error: {0}")]
    Validation(String),

    /// A write violated a store constraint; the enclosing transaction was
    /// rolled back
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// The store could not open a transaction; nothing was written
    #[error("Failed to start transaction: {0}")]
    TransactionStart(String),

    /// Commit itself failed; the transaction was rolled back
    #[error("Failed to commit transaction: {0}")]
    Commit(String),

    /// Any other store-level failure
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error during bootstrap
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Create a not found error for a user id
    pub fn not_found_user(user_id: i64) -> Self {
        Self::NotFound(format!("User with id {user_id} not found"))
    }

    /// Create a not found error for a task id
    pub fn not_found_task(task_id: i64) -> Self {
        Self::NotFound(format!("Task with id {task_id} not found"))
    }

    /// Create a validation error for an empty field
    pub fn empty_field(field: &str) -> Self {
        Self::Validation(format!("Field '{field}' cannot be empty"))
    }

    /// Create a validation error for an unparseable task date
    pub fn invalid_date(value: &str) -> Self {
        Self::Validation(format!("Invalid task date: '{value}'"))
    }

    /// Check if this error indicates a not found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// Check if this error indicates a validation problem
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    /// Check if this error indicates a constraint violation
    pub fn is_constraint(&self) -> bool {
        matches!(self, StoreError::Constraint(_))
    }

    /// Convert to the HTTP status code used by the response envelope
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::NotFound(_) => 404,
            StoreError::Validation(_) => 400,
            StoreError::Constraint(_) => 409,
            StoreError::TransactionStart(_) => 500,
            StoreError::Commit(_) => 500,
            StoreError::Database(_) => 500,
            StoreError::Configuration(_) => 500,
        }
    }
}
