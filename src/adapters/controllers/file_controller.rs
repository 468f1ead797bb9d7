use axum::{
    extract::{multipart::Field, Multipart, Path, State},
    response::Redirect,
    Json,
};
use tracing::{error, info, warn};

use crate::{
    adapters::{
        dto::file_dto::{
            RetrieveFileRequest, RetrieveFileResponse, RetrievedFile, UploadFileResponse,
        },
        state::AppState,
    },
    application::{dto::file_record_dto::FileRecordDTO, error::ApplicationError},
    domain::models::{
        file::{FileData, StorageHandle},
        file_record::FileRecord,
        share::ShareIdentifiers,
    },
};

/// Fresh identifier pairs tried before an upload is given up on.
const MAX_SHARE_ATTEMPTS: usize = 5;

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

pub struct FileController;

impl FileController {
    /// POST /api/upload
    /// Multipart body with one or more `files` parts.
    pub async fn upload_files(
        State(app_state): State<AppState>,
        mut multipart: Multipart,
    ) -> Result<Json<UploadFileResponse>, ApplicationError> {
        let mut uploaded = Vec::new();

        // All files of a request are stored or none are.
        if let Err(e) = Self::store_parts(&app_state, &mut multipart, &mut uploaded).await {
            Self::roll_back(&app_state, &uploaded).await;
            return Err(e);
        }

        if uploaded.is_empty() {
            return Err(ApplicationError::BadRequest("No files uploaded".to_string()));
        }

        info!("Upload finished: {} file(s) stored", uploaded.len());

        Ok(Json(UploadFileResponse {
            message: "Files uploaded successfully".to_string(),
            files: uploaded,
        }))
    }

    async fn store_parts(
        app_state: &AppState,
        multipart: &mut Multipart,
        uploaded: &mut Vec<FileRecord>,
    ) -> Result<(), ApplicationError> {
        let max_size = app_state.config.max_upload_size;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            warn!("Invalid multipart data: {}", e);
            ApplicationError::BadRequest("Invalid request format".to_string())
        })? {
            if field.name() != Some("files") {
                continue;
            }

            let filename = field.file_name().unwrap_or("unnamed").to_string();
            let mime_type = field
                .content_type()
                .unwrap_or(DEFAULT_MIME_TYPE)
                .to_string();
            let content = Self::read_limited(field, max_size).await?;

            let file_data = FileData::new(content, filename, mime_type);
            let record = Self::relay_and_register(app_state, file_data).await?;
            uploaded.push(record);
        }

        Ok(())
    }

    async fn roll_back(app_state: &AppState, uploaded: &[FileRecord]) {
        for record in uploaded {
            warn!("Rolling back file {} from a failed upload", record.id);
            if let Err(e) = app_state.storage_service.delete(&record.storage_handle).await {
                warn!(
                    "Failed to discard relay message {}: {:?}",
                    record.storage_handle.message_id, e
                );
            }
            app_state.file_repository.delete(&record.id);
        }
    }

    async fn read_limited(mut field: Field<'_>, max_size: u64) -> Result<Vec<u8>, ApplicationError> {
        let mut content = Vec::new();

        while let Some(chunk) = field.chunk().await.map_err(|e| {
            warn!("Cannot read file bytes: {}", e);
            ApplicationError::BadRequest("Invalid file data".to_string())
        })? {
            if (content.len() + chunk.len()) as u64 > max_size {
                return Err(ApplicationError::PayloadTooLarge);
            }
            content.extend_from_slice(&chunk);
        }

        Ok(content)
    }

    /// Hands the bytes to the relay and records the result. Nothing is stored
    /// locally unless the relay accepted the file.
    async fn relay_and_register(
        app_state: &AppState,
        file_data: FileData,
    ) -> Result<FileRecord, ApplicationError> {
        let original_name = file_data.filename.clone();
        let mime_type = file_data.mime_type.clone();
        let file_size = file_data.size();

        let handle = app_state.storage_service.upload(file_data).await?;

        match Self::register(app_state, &original_name, &handle, file_size, &mime_type) {
            Ok(record) => Ok(record),
            Err(e) => {
                error!(
                    "Could not register {} after relay upload, discarding message {}",
                    original_name, handle.message_id
                );
                if let Err(delete_err) = app_state.storage_service.delete(&handle).await {
                    warn!("Failed to discard orphaned relay message: {:?}", delete_err);
                }
                Err(e)
            }
        }
    }

    fn register(
        app_state: &AppState,
        original_name: &str,
        handle: &StorageHandle,
        file_size: u64,
        mime_type: &str,
    ) -> Result<FileRecord, ApplicationError> {
        let mut attempt = 1;
        loop {
            let identifiers = ShareIdentifiers::generate(&app_state.config.public_base_url);
            let dto = FileRecordDTO::new(
                original_name.to_string(),
                handle.clone(),
                file_size,
                mime_type.to_string(),
                identifiers,
            );

            match app_state.file_repository.create(dto) {
                Err(ApplicationError::Conflict(msg)) if attempt < MAX_SHARE_ATTEMPTS => {
                    warn!("Attempt {} to allocate share identifiers failed: {}", attempt, msg);
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// POST /api/retrieve
    /// Body: {"identifier": "<code | link | .../d/suffix>"}
    pub async fn retrieve_file(
        State(app_state): State<AppState>,
        Json(body): Json<RetrieveFileRequest>,
    ) -> Result<Json<RetrieveFileResponse>, ApplicationError> {
        if body.identifier.trim().is_empty() {
            return Err(ApplicationError::BadRequest(
                "Please enter a share code or link".to_string(),
            ));
        }

        let file = app_state
            .file_repository
            .resolve(&body.identifier)
            .ok_or_else(|| {
                ApplicationError::NotFound(format!("no file for identifier {:?}", body.identifier))
            })?;

        let download_link = app_state
            .storage_service
            .download_link(&file.storage_handle)
            .await?;

        info!("Retrieved file {} via {:?}", file.id, body.identifier);

        Ok(Json(RetrieveFileResponse {
            file: RetrievedFile::new(file, download_link),
        }))
    }

    /// GET /d/{suffix}
    /// Share links point here; redirects straight to the relay download.
    pub async fn follow_share_link(
        State(app_state): State<AppState>,
        Path(suffix): Path<String>,
    ) -> Result<Redirect, ApplicationError> {
        let file = app_state
            .file_repository
            .resolve(&format!("/d/{}", suffix))
            .ok_or_else(|| ApplicationError::NotFound(format!("no file for link /d/{}", suffix)))?;

        let download_link = app_state
            .storage_service
            .download_link(&file.storage_handle)
            .await?;

        Ok(Redirect::temporary(&download_link))
    }
}
