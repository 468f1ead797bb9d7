use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::adapters::{
    controllers::{
        admin_controller::AdminController, file_controller::FileController,
        health_controller::HealthController,
    },
    middleware::validate_admin_password,
    state::AppState,
};

async fn hello_world() -> &'static str {
    "SharePlate is running"
}

pub fn create_router(app_state: AppState, cors: CorsLayer) -> Router {
    // Routes that require the X-Admin-Password header
    let admin_routes = Router::new()
        .route("/api/admin/stats", get(AdminController::stats))
        .route("/api/admin/files", get(AdminController::list_files))
        .route("/api/admin/files/{id}", delete(AdminController::delete_file))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            validate_admin_password,
        ));

    let public_routes = Router::new()
        .route("/", get(hello_world))
        .route("/api/health", get(HealthController::health_check))
        .route(
            "/api/upload",
            // Per-file limits are enforced while the parts are read.
            post(FileController::upload_files).layer(DefaultBodyLimit::disable()),
        )
        .route("/api/retrieve", post(FileController::retrieve_file))
        .route("/api/admin/login", post(AdminController::login))
        .route("/d/{suffix}", get(FileController::follow_share_link));

    Router::new()
        .merge(admin_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
