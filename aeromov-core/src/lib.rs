pub mod error;
pub mod reports;
pub mod repository;
pub mod validate;

pub use error::{FieldErrors, RepoError, ServiceError};
