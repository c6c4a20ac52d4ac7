use crate::handlers::{health, query};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};

/// The query route needs the peer address, so serve it with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", post(query))
        .route("/health", get(health))
}
