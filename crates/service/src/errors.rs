use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A write referenced a product or client row that does not exist.
    /// The display text is the message surfaced to callers.
    #[error("Product or Client doesn't exist")]
    RelationMissing,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }
}
