//! Caching abstractions and implementations.
//!
//! - [`service`] - The [`CacheService`] trait and error types
//! - [`redis_cache`] - Redis-backed implementation
//! - [`memory_cache`] - in-process fallback used without Redis and in tests

pub mod memory_cache;
pub mod redis_cache;
pub mod service;

pub use memory_cache::MemoryCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};
