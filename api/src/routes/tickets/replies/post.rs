use crate::{auth::AuthUser, response::ApiResponse, routes::common::request_base_url};
use axum::{
    Extension, Json,
    extract::{Multipart, Path, State, multipart::MultipartRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::ServiceError;
use services::reply_service::{CreateReply, CreatedReply, ReplyService, Upload};
use util::state::AppState;

#[derive(Debug, Serialize, Default)]
pub struct ReplyFileResponse {
    pub id: i64,
    pub filename: String,
    pub url: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, Default)]
pub struct ReplyResponse {
    pub id: i64,
    pub ticket_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    pub files: Vec<ReplyFileResponse>,
}

impl From<CreatedReply> for ReplyResponse {
    fn from(created: CreatedReply) -> Self {
        let CreatedReply { reply, files } = created;
        Self {
            id: reply.id,
            ticket_id: reply.ticket_id,
            user_id: reply.user_id,
            content: reply.content,
            created_at: reply.created_at.to_rfc3339(),
            updated_at: reply.updated_at.to_rfc3339(),
            files: files
                .into_iter()
                .map(|f| ReplyFileResponse {
                    id: f.id,
                    filename: f.filename,
                    url: f.url,
                    created_at: f.created_at.to_rfc3339(),
                })
                .collect(),
        }
    }
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<ReplyResponse>::error(message)),
    )
        .into_response()
}

/// POST /tickets/{ticket_id}/replies
///
/// Adds a reply to a ticket. The body is `multipart/form-data` with one `content`
/// text field and any number of file parts (every part that carries a filename).
///
/// Files are stored under `{STORAGE_ROOT}/{ticket_id}/{filename}` and linked as
/// `{base}/files/{ticket_id}/{filename}`, where `base` is `BASE_URL` or the origin
/// the request was sent to.
///
/// ### Responses
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 3,
///     "ticket_id": 1,
///     "user_id": 2,
///     "content": "Screenshot attached",
///     "created_at": "2024-05-01T10:01:30.500+00:00",
///     "updated_at": "2024-05-01T10:01:30.500+00:00",
///     "files": [
///       { "id": 1, "filename": "pic.jpg", "url": "http://host/files/1/pic.jpg", "created_at": "2024-05-01T10:01:30.500+00:00" }
///     ]
///   },
///   "message": "Reply added successfully"
/// }
/// ```
/// - `400 Bad Request` → `"Multipart request expected"`, `"No content provided"` or an invalid filename
/// - `404 Not Found` → `"Ticket not found"`
pub async fn create_reply(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(_) => return bad_request("Multipart request expected"),
    };

    let mut content: Option<String> = None;
    let mut uploads: Vec<Upload> = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, ticket_id, "Malformed multipart body");
                return bad_request("Invalid multipart body");
            }
        };

        if let Some(filename) = field.file_name().map(str::to_owned) {
            match field.bytes().await {
                Ok(bytes) => uploads.push(Upload {
                    filename,
                    bytes: bytes.to_vec(),
                }),
                Err(e) => {
                    tracing::warn!(error = %e, ticket_id, "Failed to read uploaded file");
                    return bad_request("Invalid multipart body");
                }
            }
            continue;
        }

        if field.name() == Some("content") {
            match field.text().await {
                Ok(text) => content = Some(text),
                Err(_) => return bad_request("Invalid multipart body"),
            }
        }
    }

    let Some(content) = content.filter(|c| !c.is_empty()) else {
        return bad_request("No content provided");
    };

    let base_url = request_base_url(app_state.base_url(), &headers);
    let params = CreateReply {
        ticket_id,
        author_id: claims.sub,
        content,
        uploads,
    };

    match ReplyService::create(app_state.db(), app_state.storage(), params, &base_url).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                ReplyResponse::from(created),
                "Reply added successfully",
            )),
        )
            .into_response(),
        Err(ServiceError::Validation(msg)) => bad_request(msg),
        Err(ServiceError::NotFound(msg)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<ReplyResponse>::error(msg)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, ticket_id, "Failed to add reply");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ReplyResponse>::error("Failed to add reply")),
            )
                .into_response()
        }
    }
}
