//! Visit event model for asynchronous visit recording.

/// A captured visit, queued from the response middleware to the worker.
///
/// Carries the raw code from the request path rather than a resolved url id:
/// the middleware must not touch the store, so resolution happens in the
/// worker. All client metadata is optional; missing headers are simply
/// recorded as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitEvent {
    pub code: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl VisitEvent {
    pub fn new(code: String, ip: Option<String>, user_agent: Option<&str>) -> Self {
        Self {
            code,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
        }
    }
}
