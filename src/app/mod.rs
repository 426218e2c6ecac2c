pub mod api;
pub mod state;
pub mod web;

pub use state::AppState;

use crate::config::AppConfig;
use crate::utils::error::Result;
use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health_check))
        // JSON API
        .route(
            "/api/personas",
            get(api::list_personas).post(api::create_persona),
        )
        .route("/api/personas/buscar", get(api::find_by_email))
        .route(
            "/api/personas/:id",
            get(api::get_persona)
                .put(api::update_persona)
                .delete(api::delete_persona),
        )
        // HTML
        .route("/web", get(|| async { Redirect::to(web::WEB_ROOT) }))
        .route("/web/", get(web::index))
        .route("/web/nuevo", get(web::nuevo))
        .route("/web/guardar", post(web::guardar))
        .route("/web/editar/:id", get(web::editar))
        .route("/web/actualizar/:id", post(web::actualizar))
        .route("/web/eliminar/:id", get(web::eliminar))
        .route("/web/ver/:id", get(web::ver))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 綁定位址並執行到收到 Ctrl+C 為止
pub async fn serve(config: &AppConfig) -> Result<()> {
    let state = AppState::new(config)?;
    let app = create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Agenda listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
