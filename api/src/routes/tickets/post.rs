use super::common::TicketResponse;
use crate::{
    auth::AuthUser,
    response::ApiResponse,
    routes::common::{format_validation_errors, json_rejection_response},
};
use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use services::ticket_service::TicketService;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct TicketRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
}

/// POST /tickets
///
/// Opens a ticket owned by the caller.
///
/// ### Request Body
/// ```json
/// { "title": "VPN is down" }
/// ```
///
/// ### Responses
/// - `201 Created` with the new ticket (`status: "OPEN"`)
/// - `400 Bad Request` when the title is missing, empty or too long
pub async fn create_ticket(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    payload: Result<Json<TicketRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(mut req) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection_response::<TicketResponse>(rejection),
    };
    req.title = req.title.trim().to_string();

    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<TicketResponse>::error(format_validation_errors(&validation_errors))),
        )
            .into_response();
    }

    match TicketService::create(app_state.db(), claims.sub, &req.title).await {
        Ok(ticket) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                TicketResponse::from(ticket),
                "Ticket created successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, user_id = claims.sub, "Failed to create ticket");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<TicketResponse>::error("Failed to create ticket")),
            )
                .into_response()
        }
    }
}
