//! In-memory storage backend for tests.

mod repository;

pub use repository::InMemoryRepository;
