use crate::response::ApiResponse;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use services::ticket_service::TicketService;
use services::ticket_view::materialize;
use util::state::AppState;

/// GET /tickets/{ticket_id}
///
/// Returns the ticket thread: participants, timeline, duration and the flattened
/// conversation.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "ticketId": 1,
///     "asker": 1,
///     "parameters": { "duration": 90500 },
///     "participants": {
///       "1": { "name": "alice", "avatarUrl": null },
///       "2": { "name": "bob", "avatarUrl": "https://avatars.example.com/bob.png" }
///     },
///     "timeline": [
///       { "label": "Opened", "timestamp": "2024-05-01T10:00:00.000Z" },
///       { "label": "Replied", "timestamp": "2024-05-01T10:01:30.500Z", "userId": 2 }
///     ],
///     "conversation": [
///       { "senderId": 2, "timestamp": "2024-05-01T10:01:30.500Z", "content": { "type": "text", "text": "hi" } },
///       {
///         "senderId": 2,
///         "timestamp": "2024-05-01T10:01:30.500Z",
///         "content": { "type": "image", "name": "pic.jpg", "url": "http://host/files/1/pic.jpg", "file_type": "jpg", "size": 0 }
///       }
///     ]
///   },
///   "message": "Ticket retrieved successfully"
/// }
/// ```
/// - `404 Not Found` → `"Ticket not found"`
pub async fn get_ticket(State(app_state): State<AppState>, Path(ticket_id): Path<i64>) -> Response {
    match TicketService::load_aggregate(app_state.db(), ticket_id).await {
        Ok(Some(aggregate)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                materialize(&aggregate),
                "Ticket retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Ticket not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, ticket_id, "Failed to load ticket");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to load ticket")),
            )
                .into_response()
        }
    }
}
