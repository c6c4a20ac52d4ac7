use api_query_rest::router::create_router;
use api_query_rest::state::AppState;
use axum::Router;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// The query router with request tracing, a per-request timeout and panic
/// recovery. Serve it with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CatchPanicLayer::new())
}
