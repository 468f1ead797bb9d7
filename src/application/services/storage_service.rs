use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::models::file::{FileData, StorageHandle},
};

#[async_trait]
pub trait StorageService: Send + Sync {
    async fn upload(&self, file_data: FileData) -> Result<StorageHandle, ApplicationError>;
    async fn download_link(&self, handle: &StorageHandle) -> Result<String, ApplicationError>;
    async fn delete(&self, handle: &StorageHandle) -> Result<(), ApplicationError>;
}
