//! Core business data structures.

pub mod short_url;
pub mod visit;

pub use short_url::ShortUrl;
pub use visit::{NewVisit, Visit};
