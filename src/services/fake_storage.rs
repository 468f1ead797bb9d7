use std::sync::{
    atomic::{AtomicBool, AtomicI64, Ordering},
    Mutex,
};

use async_trait::async_trait;

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::models::file::{FileData, StorageHandle},
    services::error::RelayError,
};

/// In-process relay used by handler tests.
#[derive(Default)]
pub struct FakeStorageService {
    next_message_id: AtomicI64,
    pub fail_uploads: AtomicBool,
    pub fail_deletes: AtomicBool,
    pub deleted: Mutex<Vec<StorageHandle>>,
}

impl FakeStorageService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageService for FakeStorageService {
    async fn upload(&self, file_data: FileData) -> Result<StorageHandle, ApplicationError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(RelayError::ProviderError("Bad Request: chat not found".into()).into());
        }

        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(StorageHandle {
            file_id: format!("remote-{}", message_id),
            message_id,
            file_name: file_data.filename,
        })
    }

    async fn download_link(&self, handle: &StorageHandle) -> Result<String, ApplicationError> {
        Ok(format!("https://relay.test/file/{}", handle.file_id))
    }

    async fn delete(&self, handle: &StorageHandle) -> Result<(), ApplicationError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(RelayError::NetworkError("Request timeout".into()).into());
        }
        self.deleted.lock().unwrap().push(handle.clone());
        Ok(())
    }
}
