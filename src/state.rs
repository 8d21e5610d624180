use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ShortenerService;
use crate::domain::repository::UrlRepository;
use crate::domain::visit_event::VisitEvent;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ShortenerService>,
    pub cache: Arc<dyn CacheService>,
    pub visit_tx: mpsc::Sender<VisitEvent>,
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        visit_tx: mpsc::Sender<VisitEvent>,
        base_url: impl Into<String>,
        behind_proxy: bool,
    ) -> Self {
        let service = Arc::new(ShortenerService::new(repository, cache.clone(), base_url));
        Self {
            service,
            cache,
            visit_tx,
            behind_proxy,
        }
    }
}
