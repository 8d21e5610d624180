//! Event publisher implementations.
//!
//! - [`RedisStreamPublisher`] - XADD onto a configured stream
//! - [`NullPublisher`] - publishing disabled

pub mod null_publisher;
pub mod redis_stream_publisher;

pub use null_publisher::NullPublisher;
pub use redis_stream_publisher::RedisStreamPublisher;
