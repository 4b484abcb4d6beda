//! `/auth` route group.
//!
//! - `POST /auth/register` → `register`
//! - `POST /auth/login` → `login`

pub mod post;

use axum::{Router, routing::post};
use util::state::AppState;

use post::{login, register};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
