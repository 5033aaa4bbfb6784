//! The console's view of the Book Store.

use async_trait::async_trait;
use bookshelf_app::{Book, BookInput, FieldError};
use thiserror::Error;

/// Conditions a Book Store call can end in.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    ValidationFailed(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("request rejected: {0}")]
    BadRequest(String),

    #[error("invalid book store url '{0}'")]
    InvalidUrl(String),

    #[error("book store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response {status}: {message}")]
    Unexpected { status: u16, message: String },
}

#[async_trait]
pub trait BookApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Book>, ApiError>;
    async fn get(&self, id: &str) -> Result<Book, ApiError>;
    async fn create(&self, input: &BookInput) -> Result<Book, ApiError>;
    async fn update(&self, id: &str, input: &BookInput) -> Result<Book, ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}
