use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use aeromov_core::error::{FieldErrors, ServiceError};

#[derive(Debug)]
pub enum AppError {
    ValidationError(FieldErrors),
    NotFoundError(String),
    NoResults,
    UnavailableError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(fields) => AppError::ValidationError(fields),
            ServiceError::NotFound(entity) => AppError::NotFoundError(format!("{entity} not found")),
            ServiceError::Storage(msg) => AppError::InternalServerError(msg),
            ServiceError::NoResults => AppError::NoResults,
            ServiceError::Unavailable(msg) => AppError::UnavailableError(msg),
            ServiceError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::ValidationError(fields) => {
                let body = Json(json!({
                    "error": "Invalid data",
                    "details": fields,
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::NotFoundError(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            AppError::NoResults => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "No results found" })),
            )
                .into_response(),
            AppError::UnavailableError(msg) => {
                tracing::error!("Upstream Unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "error": "External service unavailable" })),
                )
                    .into_response()
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal Server Error" })),
                )
                    .into_response()
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}
