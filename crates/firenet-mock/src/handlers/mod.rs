pub mod client;
pub mod health;
pub mod mock;
pub mod web;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::utils::error::ApiError;

/// 302 with the same body the vendor frontend sends.
pub(crate) fn found(location: &'static str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location)],
        format!("Found. Redirecting to {}", location),
    )
        .into_response()
}

pub(crate) fn with_cookie(mut response: Response, set_cookie: &str) -> Result<Response, ApiError> {
    let value = HeaderValue::from_str(set_cookie)
        .map_err(|e| ApiError::InternalError(format!("invalid Set-Cookie value: {}", e)))?;
    response.headers_mut().append(header::SET_COOKIE, value);
    Ok(response)
}
