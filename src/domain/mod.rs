//! Domain layer containing business entities and logic.
//!
//! Defines the entities, the repository and publisher contracts, and the
//! asynchronous visit-recording pipeline, independent of infrastructure
//! concerns.
//!
//! # Visit Recording Flow
//!
//! 1. The response middleware captures the request's code and client info
//! 2. A [`visit_event::VisitEvent`] is queued on a bounded channel
//! 3. [`visit_worker::run_visit_worker`] resolves the code and persists the
//!    visit via [`repository::UrlRepository`]
//! 4. A [`publisher::VisitMessage`] is handed to the event pipeline

pub mod entities;
pub mod publisher;
pub mod repository;
pub mod visit_event;
pub mod visit_worker;

pub use publisher::{EventPublisher, PublishError, VisitMessage};
pub use repository::UrlRepository;

#[cfg(test)]
pub use publisher::MockEventPublisher;
#[cfg(test)]
pub use repository::MockUrlRepository;
