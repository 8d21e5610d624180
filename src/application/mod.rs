pub mod services;

pub use services::{CreatedShortUrl, ShortenerService, UrlStats, VisitHistory};
