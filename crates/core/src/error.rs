use crate::types::DbId;

/// Domain-level error type shared across crates.
///
/// The API layer maps each variant onto an HTTP status; see
/// `bulletin_api::error::AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id came up empty.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or missing input.
    #[error("{0}")]
    Validation(String),

    /// A unique field collided with an existing record.
    #[error("{0}")]
    Conflict(String),

    /// Missing, malformed, or rejected credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// A media backend could not persist uploaded bytes.
    #[error("storage write failed: {0}")]
    Storage(String),

    /// Anything else.
    #[error("{0}")]
    Internal(String),
}
