//! `/tickets` route group.
//!
//! - `POST  /tickets` → open a ticket
//! - `PATCH /tickets/{ticket_id}/close` → close a ticket
//! - `GET   /tickets/{ticket_id}` → materialized thread view
//! - `/tickets/{ticket_id}/replies` → see [`replies`]

use axum::{
    Router,
    routing::{get, patch, post},
};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod patch;
pub mod post;
pub mod replies;

use get::get_ticket;
use patch::close_ticket;
use post::create_ticket;
use replies::replies_routes;

pub fn tickets_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_ticket))
        .route("/{ticket_id}", get(get_ticket))
        .route("/{ticket_id}/close", patch(close_ticket))
        .nest("/{ticket_id}/replies", replies_routes())
}
