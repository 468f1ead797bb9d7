pub mod admin_dto;
pub mod file_dto;
