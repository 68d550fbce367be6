use std::sync::Arc;

use infra::Persistence;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Persistence>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<Persistence>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
