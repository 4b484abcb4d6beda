use crate::response::ApiResponse;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use db::models::reply_files::Model as ReplyFileModel;
use tokio::fs::File as FsFile;
use tokio_util::io::ReaderStream;
use util::state::AppState;

/// GET /files/{ticket_id}/{filename}
///
/// Streams an attachment as `application/octet-stream` with
/// `Content-Disposition: attachment`.
///
/// ### Responses
/// - `200 OK` with the raw bytes
/// - `404 Not Found` → `"File not found"` (no such attachment) or `"File missing on disk"`
pub async fn download_file(
    State(app_state): State<AppState>,
    Path((ticket_id, filename)): Path<(i64, String)>,
) -> Response {
    let file = match ReplyFileModel::find_by_ticket_and_filename(app_state.db(), ticket_id, &filename).await {
        Ok(Some(f)) => f,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("File not found")),
            )
                .into_response();
        }
        Err(err) => {
            tracing::error!(error = %err, ticket_id, filename = %filename, "DB error fetching file");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Database error")),
            )
                .into_response();
        }
    };

    let fs_path = app_state.storage().resolve(&file.path);

    let handle = match FsFile::open(&fs_path).await {
        Ok(f) => f,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %fs_path.display(), "Attachment row without file on disk");
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("File missing on disk")),
            )
                .into_response();
        }
        Err(err) => {
            tracing::error!(error = %err, path = %fs_path.display(), "File open error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Could not open file")),
            )
                .into_response();
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file.filename))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );

    let body = Body::from_stream(ReaderStream::new(handle));

    (StatusCode::OK, headers, body).into_response()
}
