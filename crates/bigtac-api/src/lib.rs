pub mod handlers;

use std::future::Future;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub use handlers::ApiState;

/// Build the relay's router.
pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::handle_banner))
        .route("/create", post(handlers::handle_create))
        .route("/join", post(handlers::handle_join))
        .route("/wait", post(handlers::handle_wait))
        .route("/move", post(handlers::handle_move))
        .route("/status", get(handlers::handle_status))
        .route("/sessions/{id}", get(handlers::handle_session_inspect))
        .with_state(state)
        .layer(cors)
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve_on(
    listener: tokio::net::TcpListener,
    state: ApiState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "API listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
