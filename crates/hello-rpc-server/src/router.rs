//! Axum router wiring.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    let max_body = state.cfg().server.max_body_bytes;
    Router::new()
        .route("/rpc", post(transport::http::rpc))
        .route("/rpc/describe", get(transport::http::describe))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}
