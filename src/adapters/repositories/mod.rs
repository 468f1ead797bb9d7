mod in_memory_file_repository;

pub use in_memory_file_repository::InMemoryFileRepository;
