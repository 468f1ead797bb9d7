use crate::{
    application::{dto::file_record_dto::FileRecordDTO, error::ApplicationError},
    domain::models::file_record::{FileRecord, FileStats},
};

/// The file registry.
///
/// Calls never block on I/O. Lookups report absence as `None`; the only
/// fallible operation is `create`, which refuses a share code or link that a
/// live record already holds.
pub trait FileRepository: Send + Sync {
    fn create(&self, file: FileRecordDTO) -> Result<FileRecord, ApplicationError>;
    fn get_by_id(&self, id: &str) -> Option<FileRecord>;
    fn get_by_code(&self, code: &str) -> Option<FileRecord>;
    fn get_by_link(&self, link: &str) -> Option<FileRecord>;
    /// Accepts a share code, a full share link, or any string ending in
    /// `/d/<suffix>`.
    fn resolve(&self, identifier: &str) -> Option<FileRecord>;
    fn delete(&self, id: &str) -> bool;
    /// Most recent upload first.
    fn list_all(&self) -> Vec<FileRecord>;
    fn stats(&self) -> FileStats;
}
