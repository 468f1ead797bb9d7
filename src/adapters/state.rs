use axum::extract::FromRef;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::{
    application::{repositories::file_repository::FileRepository, services::StorageService},
    domain::config::app::AppConfig,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub started_at: DateTime<Utc>,
    pub file_repository: Arc<dyn FileRepository>,
    pub storage_service: Arc<dyn StorageService>,
}
