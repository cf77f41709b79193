use crate::config::Config;
use crate::store::AuctionStore;
use std::sync::Arc;

/// 핸들러 공유 상태
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AuctionStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn AuctionStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
