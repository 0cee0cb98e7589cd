use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use common::storage::StorageError;
use serde::Serialize;

use crate::models::validation::FieldViolation;
use crate::store::StoreError;

/// Body returned with `400 Bad Request`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ValidationErrorBody {
    /// One rendered message per broken rule, in rule order.
    #[schema(example = json!(["El campo nombre no puede estar vacío"]))]
    pub errors: Vec<String>,
    pub timestamp: DateTime<Utc>,
    #[schema(example = 400)]
    pub status: u16,
}

/// Body returned with `500 Internal Server Error`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    #[schema(example = "INTERNAL_ERROR")]
    pub code: &'static str,
    #[schema(example = "An unexpected error occurred")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Rule violations or an undecodable request body.
    Validation(Vec<String>),
    /// The identifier does not resolve to a record. Rendered with an empty body.
    NotFound,
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(vec![message.into()])
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                let status = StatusCode::BAD_REQUEST;
                let body = ValidationErrorBody {
                    errors,
                    timestamp: Utc::now(),
                    status: status.as_u16(),
                };
                (status, Json(body)).into_response()
            }
            AppError::NotFound => {
                tracing::debug!("Record not found");
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<Vec<FieldViolation>> for AppError {
    fn from(violations: Vec<FieldViolation>) -> Self {
        AppError::Validation(violations.iter().map(ToString::to_string).collect())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidName(_) | StorageError::SizeLimitExceeded { .. } => {
                AppError::validation(err.to_string())
            }
            StorageError::Io(_) => AppError::Internal(err.to_string()),
        }
    }
}
