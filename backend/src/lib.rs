//! PreciosP backend
//!
//! Product costing and pricing API for small producers: measurement units,
//! ingredients, products built from ingredient lines, and fixed expenses.

use std::sync::Arc;

use axum::{routing::get, Router};
use sqlx::SqlitePool;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
}

/// Open the database and prepare shared state
pub async fn build_state(config: Config) -> AppResult<AppState> {
    let db = db::connect(&config.database).await?;

    if config.database.seed_units {
        services::MeasurementUnitService::new(db.clone())
            .seed_defaults()
            .await?;
    }

    Ok(AppState {
        db,
        config: Arc::new(config),
    })
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes());

    if let Some(dir) = state.config.server.static_dir.as_deref() {
        let index = std::path::Path::new(dir).join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
