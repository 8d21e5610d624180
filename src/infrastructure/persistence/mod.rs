//! Repository implementations.
//!
//! - [`PgUrlRepository`] - PostgreSQL, the production store
//! - [`MemoryUrlRepository`] - DashMap-backed, for tests and local runs

pub mod memory_url_repository;
pub mod pg_url_repository;

pub use memory_url_repository::MemoryUrlRepository;
pub use pg_url_repository::PgUrlRepository;
