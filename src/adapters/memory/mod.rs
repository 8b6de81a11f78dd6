//! In-Memory Persistence Adapters
//!
//! `tokio::sync::RwLock`-guarded maps implementing the persistence ports.
//! Used by the binary until a durable store is wired in, and by tests.

mod completion_repository;
mod content_repository;
mod profile_store;

pub use completion_repository::InMemoryCompletionRepository;
pub use content_repository::InMemoryContentRepository;
pub use profile_store::InMemoryUserProfileStore;
