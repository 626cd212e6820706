use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use micropos_core::error::CoreError;
use micropos_core::types::CorrelationId;
use micropos_db::DbError;
use serde_json::json;
use validator::ValidationErrors;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for missing rows and adds request and backend variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `micropos_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A request body broke a field rule.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A request body could not be decoded.
    #[error("Invalid request body: {0}")]
    Json(#[from] JsonRejection),

    /// The backend call failed. `context` is the client-facing summary.
    #[error("Error ID: {error_id}; {context}")]
    Backend {
        error_id: CorrelationId,
        context: String,
        #[source]
        source: DbError,
    },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Wrap a backend failure under a fresh correlation id.
    pub fn backend(context: impl Into<String>, source: DbError) -> Self {
        AppError::Backend {
            error_id: CorrelationId::new(),
            context: context.into(),
            source,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),

            // --- Request body errors ---
            AppError::Validation(errors) => {
                let body = json!({
                    "error": errors.to_string(),
                    "code": "VALIDATION_ERROR",
                    "fields": errors,
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
            }
            AppError::Json(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                rejection.body_text(),
            ),

            // --- Backend errors ---
            AppError::Backend {
                error_id,
                context,
                source,
            } => {
                tracing::error!(
                    error_id = %error_id,
                    kind = source.kind(),
                    error = %source,
                    "{context}"
                );
                let body = json!({
                    "error": self.to_string(),
                    "code": "BACKEND_ERROR",
                    "error_id": error_id,
                });
                return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response();
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
