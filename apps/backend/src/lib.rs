pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::services::progress::ProgressService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub progress: ProgressService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        let db = Arc::new(db);
        Self {
            progress: ProgressService::new(db.clone()),
            db,
            config: Arc::new(config),
        }
    }
}

/// Build the full router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Progress routes
        .route("/api/progress", post(routes::progress::submit))
        .route(
            "/api/progress/{user_id}/{activity_type}",
            get(routes::progress::list),
        )
        .route(
            "/api/levels/{user_id}/{activity_type}",
            get(routes::progress::levels),
        )
        .route("/api/user-stats/{user_id}", get(routes::progress::user_stats))
        // User routes
        .route("/api/sync-user", post(routes::users::sync_user))
        // Content routes
        .route("/api/vocabulary/{level}", get(routes::content::vocabulary))
        .route("/api/grammar_questions/{level}", get(routes::content::grammar))
        .route("/api/fill-blank/{level}", get(routes::content::fill_blank))
        .route(
            "/api/image_questions/{level}",
            get(routes::content::image_questions),
        )
        .route("/api/sentences/{level}", get(routes::content::sentences))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url, config.max_db_connections).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let addr = config.bind_addr();
    let app = router(AppState::new(db, config));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
