//! Utility functions shared across layers.
//!
//! - [`base62`] - Short code encoding and decoding
//! - [`url_normalizer`] - Canonical URL form for duplicate detection
//! - [`db_error`] - Postgres constraint-violation classification

pub mod base62;
pub mod db_error;
pub mod url_normalizer;
