use std::collections::BTreeMap;

/// Field name -> list of validation messages. BTreeMap keeps the
/// serialized order stable.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors surfaced by the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("record not found")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors surfaced by the service layer. The HTTP layer maps each variant
/// to a status code; nothing below it panics through a request.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid data")]
    Validation(FieldErrors),
    #[error("{0} not found")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("no results found")]
    NoResults,
    #[error("external service unavailable: {0}")]
    Unavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Translate a repository failure, naming the entity for 404 bodies.
    pub fn from_repo(entity: &str, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => ServiceError::NotFound(entity.to_string()),
            RepoError::Storage(msg) => ServiceError::Storage(msg),
        }
    }
}
