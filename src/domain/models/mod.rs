pub mod file;
pub mod file_record;
pub mod share;
