//! Storage implementations for the tenant settings module.

mod in_memory_repo;

pub use in_memory_repo::InMemorySettingsRepository;
