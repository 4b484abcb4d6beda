use crate::response::ApiResponse;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

/// Flattens every field error message into one `;`-separated string.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Maps a malformed or incomplete JSON body to `400` inside the usual envelope.
pub fn json_rejection_response<T>(rejection: JsonRejection) -> Response
where
    T: Serialize + Default,
{
    tracing::debug!(error = %rejection.body_text(), "Rejected JSON body");
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<T>::error(rejection.body_text())),
    )
        .into_response()
}

/// Public origin of the server as seen by the client.
///
/// `configured` (from `BASE_URL`) wins; otherwise `{X-Forwarded-Proto or http}://{Host}`.
pub fn request_base_url(configured: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(base) = configured {
        return base.trim_end_matches('/').to_string();
    }

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    format!("{scheme}://{host}")
}
