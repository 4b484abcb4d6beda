//! `/tickets/{ticket_id}/replies` route group.
//!
//! - `POST /tickets/{ticket_id}/replies` → add a reply with optional attachments

pub mod post;

use axum::{Router, routing::post};
use util::state::AppState;

use post::create_reply;

pub fn replies_routes() -> Router<AppState> {
    Router::new().route("/", post(create_reply))
}
