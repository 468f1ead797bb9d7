use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::file_record::FileRecord;

#[derive(Debug, Serialize)]
pub struct UploadFileResponse {
    pub message: String,
    pub files: Vec<FileRecord>,
}

#[derive(Debug, Deserialize)]
pub struct RetrieveFileRequest {
    #[serde(default)]
    pub identifier: String,
}

#[derive(Debug, Serialize)]
pub struct RetrievedFile {
    pub id: String,
    #[serde(rename = "originalName")]
    pub original_name: String,
    #[serde(rename = "fileSize")]
    pub file_size: u64,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
    #[serde(rename = "downloadLink")]
    pub download_link: String,
}

impl RetrievedFile {
    pub fn new(file: FileRecord, download_link: String) -> Self {
        Self {
            id: file.id,
            original_name: file.original_name,
            file_size: file.file_size,
            mime_type: file.mime_type,
            uploaded_at: file.uploaded_at,
            download_link,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RetrieveFileResponse {
    pub file: RetrievedFile,
}
