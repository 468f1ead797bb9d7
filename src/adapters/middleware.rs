use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

use crate::domain::config::app::AppConfig;

pub const ADMIN_PASSWORD_HEADER: &str = "X-Admin-Password";

fn reject(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

/// Guards the admin routes with the shared admin password.
pub async fn validate_admin_password(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
    request: Request<Body>,
    next: Next,
) -> Response {
    match headers.get(ADMIN_PASSWORD_HEADER) {
        Some(header_value) => match header_value.to_str() {
            Ok(provided) if provided == config.admin_password => next.run(request).await,
            Ok(_) => {
                warn!("Invalid admin password provided in {} header", ADMIN_PASSWORD_HEADER);
                reject(StatusCode::UNAUTHORIZED, "Unauthorized")
            }
            Err(_) => {
                warn!("{} header contains invalid UTF-8", ADMIN_PASSWORD_HEADER);
                reject(StatusCode::BAD_REQUEST, "Bad request")
            }
        },
        None => {
            warn!("{} header is missing", ADMIN_PASSWORD_HEADER);
            reject(StatusCode::UNAUTHORIZED, "Unauthorized")
        }
    }
}
