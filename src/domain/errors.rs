// src/domain/errors.rs
use crate::domain::content::Collection;
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid slug: {0}")]
    InvalidSlug(String),
    #[error("unable to generate unique slug for {candidate:?} after {attempts} attempts")]
    SlugExhausted { candidate: String, attempts: u32 },
    #[error("collection {0} is not available")]
    CollectionUnavailable(Collection),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}
