pub mod routes;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the keep-alive router. Used by `serve()` and available for testing.
pub fn build_router() -> Router {
    Router::new()
        .route("/", get(routes::alive))
        .route("/healthz", get(routes::healthz))
        .layer(TraceLayer::new_for_http())
}

/// Start the keep-alive listener on `0.0.0.0:{port}`.
pub async fn serve(port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(listener).await
}

/// Start the keep-alive listener on a pre-bound listener.
///
/// Lets the caller read the actual port first when binding to port 0.
pub async fn serve_on(listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    tracing::info!("keep-alive listening on http://0.0.0.0:{actual_port}");
    axum::serve(listener, build_router()).await?;
    Ok(())
}
