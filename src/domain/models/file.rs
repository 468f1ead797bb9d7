use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

impl FileData {
    pub fn new(content: Vec<u8>, filename: String, mime_type: String) -> Self {
        Self {
            content,
            filename,
            mime_type,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Reference to an object held by the upload relay.
///
/// Needed to build a download URL and to discard the backing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageHandle {
    #[serde(rename = "fileId")]
    pub file_id: String,
    #[serde(rename = "messageId")]
    pub message_id: i64,
    #[serde(rename = "fileName")]
    pub file_name: String,
}
