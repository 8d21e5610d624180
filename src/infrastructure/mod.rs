//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer against concrete
//! backends.
//!
//! # Modules
//!
//! - [`cache`] - Caching (Redis and in-process implementations)
//! - [`persistence`] - URL repositories (PostgreSQL and in-memory)
//! - [`events`] - Visit event publishers (Redis Streams and no-op)

pub mod cache;
pub mod events;
pub mod persistence;
