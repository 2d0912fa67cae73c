use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}

/// True when the database rejected a write because a referenced row does not
/// exist in its owning table. Classified through sea-orm's typed `SqlErr`
/// rather than backend-specific error-code strings, so any supported backend
/// supplies its own mapping.
pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}
