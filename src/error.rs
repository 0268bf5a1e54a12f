//! Error types for the goal planning engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {

    // =============================
    // Engine Errors
    // =============================

    /// Malformed numeric/date input. Only raised when a strict input
    /// policy is installed; the default policy logs and accepts.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Unknown {domain} class: {value}")]
    UnknownClass { domain: &'static str, value: String },

    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    // =============================
    // Record Store Errors
    // =============================

    #[error("Storage error: {0}")]
    Storage(String),

    /// The store refused a goal whose slug is already taken.
    #[error("Goal slug already exists: {0}")]
    DuplicateSlug(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl EngineError {
    pub fn goal_not_found(id: impl ToString) -> Self {
        EngineError::NotFound {
            entity: "Goal",
            id: id.to_string(),
        }
    }
}
