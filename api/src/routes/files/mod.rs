//! `/files` route group.
//!
//! - `GET /files/{ticket_id}/{filename}` → download a reply attachment

pub mod get;

use axum::{Router, routing::get};
use util::state::AppState;

use get::download_file;

pub fn files_routes() -> Router<AppState> {
    Router::new().route("/{ticket_id}/{filename}", get(download_file))
}
