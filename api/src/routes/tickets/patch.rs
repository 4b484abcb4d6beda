use super::common::TicketResponse;
use crate::response::ApiResponse;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use services::ServiceError;
use services::ticket_service::TicketService;
use util::state::AppState;

/// PATCH /tickets/{ticket_id}/close
///
/// Marks the ticket closed. The close time becomes the `Closed` event of the
/// ticket's timeline.
///
/// ### Responses
/// - `200 OK` with the ticket (`status: "CLOSED"`)
/// - `404 Not Found` → `"Ticket not found"`
pub async fn close_ticket(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> impl IntoResponse {
    match TicketService::close(app_state.db(), ticket_id).await {
        Ok(ticket) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TicketResponse::from(ticket),
                "Ticket closed successfully",
            )),
        ),
        Err(ServiceError::NotFound(msg)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<TicketResponse>::error(msg)),
        ),
        Err(e) => {
            tracing::error!(error = %e, ticket_id, "Failed to close ticket");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<TicketResponse>::error("Failed to close ticket")),
            )
        }
    }
}
