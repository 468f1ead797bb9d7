mod adapters;
mod application;
mod domain;
mod services;

use std::sync::Arc;

use adapters::{repositories::InMemoryFileRepository, router::create_router, state::AppState};
use application::repositories::file_repository::FileRepository;
use domain::config::app::AppConfig;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn build_cors(config: &AppConfig) -> CorsLayer {
    match &config.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins: Vec<_> = allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the environment may already be populated.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Starting shareplate-service on port {} with base URL {}",
        config.port, config.public_base_url
    );

    let storage_service = match services::create_storage_service(&config.telegram) {
        Ok(service) => service,
        Err(e) => {
            error!("ERROR: Failed to create relay client: {}", e);
            std::process::exit(1);
        }
    };

    let cors = build_cors(&config);
    let port = config.port;

    let app_state = AppState {
        config: Arc::new(config),
        started_at: chrono::Utc::now(),
        file_repository: Arc::new(InMemoryFileRepository::new()) as Arc<dyn FileRepository>,
        storage_service,
    };

    let router = create_router(app_state, cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");
}
