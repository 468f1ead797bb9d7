mod error;
#[cfg(test)]
pub(crate) mod fake_storage;
mod telegram_storage;

pub use error::RelayError;
pub use telegram_storage::TelegramStorageService;

use std::sync::Arc;

use crate::{application::services::StorageService, domain::config::app::TelegramConfig};

pub fn create_storage_service(
    config: &TelegramConfig,
) -> Result<Arc<dyn StorageService>, RelayError> {
    let service = TelegramStorageService::new(config.clone())?;
    Ok(Arc::new(service))
}
