use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum LookupError {
    #[error("Error making HTTP request: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status code {0}")]
    UnexpectedStatus(u16),

    #[error("Invalid response body: {0}")]
    InvalidBody(String),
}

#[async_trait]
pub trait CuitExistenceLookup: Send + Sync {
    /// Whether `cuit` is already registered, ignoring the record whose CUIT is `exclude`.
    /// Both values are canonical (digits only).
    async fn exists(&self, cuit: &str, exclude: Option<&str>) -> Result<bool, LookupError>;
}
