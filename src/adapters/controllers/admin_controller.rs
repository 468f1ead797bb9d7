use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::admin_dto::{AdminLoginRequest, FileListResponse, MessageResponse},
        state::AppState,
    },
    application::error::ApplicationError,
    domain::models::file_record::FileStats,
};

pub struct AdminController;

impl AdminController {
    /// POST /api/admin/login
    pub async fn login(
        State(app_state): State<AppState>,
        Json(body): Json<AdminLoginRequest>,
    ) -> Result<Json<MessageResponse>, ApplicationError> {
        if body.password.is_empty() {
            return Err(ApplicationError::BadRequest(
                "Password is required".to_string(),
            ));
        }

        if body.password != app_state.config.admin_password {
            return Err(ApplicationError::Unauthorized);
        }

        info!("Admin login succeeded");
        Ok(Json(MessageResponse::new("Login successful")))
    }

    /// GET /api/admin/stats
    pub async fn stats(State(app_state): State<AppState>) -> Json<FileStats> {
        Json(app_state.file_repository.stats())
    }

    /// GET /api/admin/files
    pub async fn list_files(State(app_state): State<AppState>) -> Json<FileListResponse> {
        Json(FileListResponse {
            files: app_state.file_repository.list_all(),
        })
    }

    /// DELETE /api/admin/files/{id}
    /// The relay copy is removed best-effort; the local record goes regardless.
    pub async fn delete_file(
        State(app_state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<Json<MessageResponse>, ApplicationError> {
        let file = app_state
            .file_repository
            .get_by_id(&id)
            .ok_or_else(|| ApplicationError::NotFound(format!("no file with id {}", id)))?;

        if let Err(e) = app_state.storage_service.delete(&file.storage_handle).await {
            warn!(
                "Failed to delete message {} for file {} from relay: {:?}",
                file.storage_handle.message_id, id, e
            );
        }

        if !app_state.file_repository.delete(&id) {
            // Removed concurrently between lookup and delete.
            return Err(ApplicationError::NotFound(format!("file {} already removed", id)));
        }

        info!("Deleted file {}", id);
        Ok(Json(MessageResponse::new("File deleted successfully")))
    }
}
