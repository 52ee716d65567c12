//! RequireFlow Web Server
//!
//! Axum-based JSON API over the requirement, customer and user stores.

pub mod error;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use requireflow_core::Workspace;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Requirements
        .route(
            "/requirements",
            get(routes::requirements::list_requirements)
                .post(routes::requirements::create_requirement),
        )
        .route(
            "/requirements/{id}",
            get(routes::requirements::get_requirement)
                .put(routes::requirements::update_requirement)
                .delete(routes::requirements::delete_requirement),
        )
        .route(
            "/requirements/{id}/comments",
            axum::routing::post(routes::requirements::add_comment),
        )
        .route(
            "/requirements/{id}/customer",
            get(routes::requirements::get_requirement_customer),
        )
        .route(
            "/requirements/{id}/links",
            get(routes::requirements::get_linked_requirements),
        )
        // Customers
        .route(
            "/customers",
            get(routes::customers::list_customers).post(routes::customers::create_customer),
        )
        .route("/customers/{id}", get(routes::customers::get_customer))
        // Users
        .route("/users", get(routes::users::list_users))
        .route("/users/{id}", get(routes::users::get_user))
        // Stats
        .route("/stats/dashboard", get(routes::stats::get_dashboard))
        .route("/stats/breakdown", get(routes::stats::get_breakdown))
        .with_state(state);

    Router::new()
        .route("/health", get(routes::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Run the web server until Ctrl-C.
pub async fn run_server(ws: Workspace, host: &str, port: u16) -> anyhow::Result<()> {
    let data_dir = ws.data_dir().display().to_string();
    let app = create_router(AppState::new(ws));

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!(%data_dir, "Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
