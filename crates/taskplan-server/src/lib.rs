pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub use state::AppState;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Plans
        .route("/api/plans", post(routes::plans::create_plan))
        .route("/api/plans", get(routes::plans::list_plans))
        .route("/api/plans/final", get(routes::plans::final_plan))
        .route("/api/plans/{index}", put(routes::plans::edit_plan))
        .route("/api/plans/{index}", delete(routes::plans::delete_plan))
        .route(
            "/api/plans/{index}/refine",
            post(routes::plans::refine_plan),
        )
        .route(
            "/api/plans/{index}/confirm",
            post(routes::plans::confirm_plan),
        )
        .route(
            "/api/plans/{index}/accept",
            post(routes::plans::accept_plan),
        )
        // Stats
        .route("/api/stats", get(routes::stats::get_stats))
        .layer(cors)
        .with_state(app_state)
}

/// Start the taskplan API server.
pub async fn serve(app_state: AppState, port: u16) -> anyhow::Result<()> {
    let app = build_router(app_state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("taskplan API listening on http://localhost:{port}");

    axum::serve(listener, app).await?;
    Ok(())
}
