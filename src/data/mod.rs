mod json_store;
mod loader;
mod memory;
mod repository;

pub use json_store::JsonRepository;
pub use loader::{LoadError, load_question_rows, load_test_text};
pub use memory::{MemoryRepository, Tables};
pub use repository::{RepoError, RepoResult, Repository};
