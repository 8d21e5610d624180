//! HTTP middleware for request processing.
//!
//! Provides observability and visit capture middleware.

pub mod tracing;
pub mod visit_capture;
