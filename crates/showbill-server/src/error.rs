//! Mapping of validation and repository failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::forms::ValidationErrors;
use showbill_db::RepoError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Field-level problems; the submitted form is echoed back for re-rendering.
    #[error("invalid submission: {errors}")]
    Invalid {
        errors: ValidationErrors,
        form: Value,
    },

    #[error("{message}")]
    Conflict { message: String, form: Value },

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid(errors: ValidationErrors, form: &impl Serialize) -> Self {
        ApiError::Invalid {
            errors,
            form: echo(form),
        }
    }

    /// Map a repository failure that happened while handling a form submission.
    pub fn from_submission(err: RepoError, form: &impl Serialize, failure: String) -> Self {
        match err {
            RepoError::Duplicate { .. } => {
                tracing::warn!(error = %err, "submission rejected by unique constraint");
                ApiError::Conflict {
                    message: failure,
                    form: echo(form),
                }
            }
            RepoError::MissingReference { field, id } => ApiError::invalid(
                ValidationErrors::single(field, format!("No record with id {id}")),
                form,
            ),
            other => other.into(),
        }
    }
}

fn echo(form: &impl Serialize) -> Value {
    serde_json::to_value(form).unwrap_or(Value::Null)
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            RepoError::Duplicate { .. } => ApiError::Conflict {
                message: err.to_string(),
                form: Value::Null,
            },
            RepoError::MissingReference { field, id } => ApiError::Invalid {
                errors: ValidationErrors::single(field, format!("No record with id {id}")),
                form: Value::Null,
            },
            RepoError::Database(e) => {
                tracing::error!(error = %e, "database error");
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Invalid { errors, form } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "validation failed", "errors": errors, "form": form }),
            ),
            ApiError::Conflict { message, form } => (
                StatusCode::CONFLICT,
                json!({ "error": message, "form": form }),
            ),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            // details stay in the logs
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "internal server error" }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
