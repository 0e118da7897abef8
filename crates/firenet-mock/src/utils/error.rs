use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::templates::TemplateError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authorisation required!")]
    Unauthorized,

    /// Unknown stove for a valid session. Answered with 500 like the vendor API.
    #[error("Stove {stove_id} is not registered for user {user}")]
    StoveNotRegistered { stove_id: String, user: String },

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error_type) = match &self {
            ApiError::Unauthorized => {
                tracing::warn!("Unauthorized: {}", message);
                (StatusCode::UNAUTHORIZED, "Unauthorized")
            }
            ApiError::StoveNotRegistered { .. } => {
                tracing::warn!("Unregistered stove: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, "StoveNotRegistered")
            }
            ApiError::Template(_) => {
                tracing::error!("Template error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, "TemplateError")
            }
            ApiError::InternalError(_) => {
                tracing::error!("Internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError")
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
