//! HTTP route entry point.
//!
//! Route groups:
//! - `/health` → liveness probe (public)
//! - `/auth` → registration and login (public)
//! - `/tickets` → ticket lifecycle, replies and the materialized thread view (authenticated)
//! - `/files` → attachment downloads (authenticated)

use crate::auth::guards::allow_authenticated;
use crate::routes::{
    auth::auth_routes, files::files_routes, health::health_routes, tickets::tickets_routes,
};
use axum::{Router, middleware::from_fn_with_state};
use util::state::AppState;

pub mod auth;
pub mod common;
pub mod files;
pub mod health;
pub mod tickets;

/// Builds the complete application router for all HTTP endpoints.
///
/// Protected groups sit behind `allow_authenticated`, which needs the state for
/// the JWT decoding key.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest(
            "/tickets",
            tickets_routes().route_layer(from_fn_with_state(app_state.clone(), allow_authenticated)),
        )
        .nest(
            "/files",
            files_routes().route_layer(from_fn_with_state(app_state.clone(), allow_authenticated)),
        )
        .with_state(app_state)
}
