use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::file::StorageHandle;

/// One entry per upload the relay accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    #[serde(rename = "originalName")]
    pub original_name: String,
    #[serde(rename = "storageHandle")]
    pub storage_handle: StorageHandle,
    #[serde(rename = "fileSize")]
    pub file_size: u64,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    #[serde(rename = "shareCode")]
    pub share_code: String,
    #[serde(rename = "shareLink")]
    pub share_link: String,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    #[serde(rename = "totalFiles")]
    pub total_files: u64,
    #[serde(rename = "totalStorage")]
    pub total_storage: u64,
    #[serde(rename = "todayUploads")]
    pub today_uploads: u64,
    #[serde(rename = "activeLinks")]
    pub active_links: u64,
}
