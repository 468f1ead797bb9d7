use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::{
    file::StorageHandle, file_record::FileRecord, share::ShareIdentifiers,
};

/// Everything the registry needs to store a new record; identity and upload
/// time are assigned on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecordDTO {
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
}

impl FileRecordDTO {
    pub fn new(
        original_name: String,
        storage_handle: StorageHandle,
        file_size: u64,
        mime_type: String,
        identifiers: ShareIdentifiers,
    ) -> Self {
        Self {
            original_name,
            storage_handle,
            file_size,
            mime_type,
            share_code: identifiers.share_code,
            share_link: identifiers.share_link,
        }
    }

    pub fn into_record(self) -> FileRecord {
        FileRecord {
            id: Uuid::new_v4().to_string(),
            original_name: self.original_name,
            storage_handle: self.storage_handle,
            file_size: self.file_size,
            mime_type: self.mime_type,
            share_code: self.share_code,
            share_link: self.share_link,
            uploaded_at: Utc::now(),
        }
    }
}
