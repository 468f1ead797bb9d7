use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::{
    application::{
        dto::file_record_dto::FileRecordDTO, error::ApplicationError,
        repositories::file_repository::FileRepository,
    },
    domain::models::{
        file_record::{FileRecord, FileStats},
        share::Identifier,
    },
};

/// Process-local registry. Everything is lost on restart.
#[derive(Default)]
pub struct InMemoryFileRepository {
    files: RwLock<HashMap<String, FileRecord>>,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // Writers never leave the map half-updated, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, FileRecord>> {
        self.files.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, FileRecord>> {
        self.files.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn find<P>(&self, predicate: P) -> Option<FileRecord>
    where
        P: Fn(&FileRecord) -> bool,
    {
        self.read().values().find(|file| predicate(file)).cloned()
    }

    fn stats_at(&self, now: DateTime<Local>) -> FileStats {
        let files = self.read();
        let today = now.date_naive();

        let total_files = files.len() as u64;
        let total_storage = files.values().map(|file| file.file_size).sum();
        let today_uploads = files
            .values()
            .filter(|file| file.uploaded_at.with_timezone(&Local).date_naive() >= today)
            .count() as u64;

        FileStats {
            total_files,
            total_storage,
            today_uploads,
            active_links: total_files,
        }
    }

    #[cfg(test)]
    pub(crate) fn insert_record(&self, record: FileRecord) {
        self.write().insert(record.id.clone(), record);
    }
}

impl FileRepository for InMemoryFileRepository {
    fn create(&self, file: FileRecordDTO) -> Result<FileRecord, ApplicationError> {
        let mut files = self.write();

        if let Some(existing) = files
            .values()
            .find(|f| f.share_code == file.share_code || f.share_link == file.share_link)
        {
            warn!(
                "Share identifier collision with file {} (code {}, link {})",
                existing.id, file.share_code, file.share_link
            );
            return Err(ApplicationError::Conflict(
                "Share code or link already in use".to_string(),
            ));
        }

        let record = file.into_record();
        files.insert(record.id.clone(), record.clone());

        info!(
            "Registered file {} ({} bytes) with code {}",
            record.id, record.file_size, record.share_code
        );
        Ok(record)
    }

    fn get_by_id(&self, id: &str) -> Option<FileRecord> {
        self.read().get(id).cloned()
    }

    fn get_by_code(&self, code: &str) -> Option<FileRecord> {
        self.find(|file| file.share_code == code)
    }

    fn get_by_link(&self, link: &str) -> Option<FileRecord> {
        self.find(|file| file.share_link == link)
    }

    fn resolve(&self, identifier: &str) -> Option<FileRecord> {
        let classified = Identifier::classify(identifier);
        debug!("Resolving identifier {:?} as {:?}", identifier, classified);

        match classified? {
            Identifier::Code(code) => self.get_by_code(code),
            Identifier::Link(link) => self.get_by_link(link),
            Identifier::LinkSuffix(suffix) => {
                let tail = format!("/d/{}", suffix);
                self.find(|file| file.share_link.ends_with(&tail))
            }
        }
    }

    fn delete(&self, id: &str) -> bool {
        let removed = self.write().remove(id).is_some();
        if removed {
            info!("Removed file {} from registry", id);
        }
        removed
    }

    fn list_all(&self) -> Vec<FileRecord> {
        let mut files: Vec<FileRecord> = self.read().values().cloned().collect();
        files.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        files
    }

    fn stats(&self) -> FileStats {
        self.stats_at(Local::now())
    }
}
