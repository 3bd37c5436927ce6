use std::sync::Arc;

use crate::backend::{BackendClient, BackendError};
use crate::config::AppConfig;

/// Read-only state shared by every request handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub backend: BackendClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, BackendError> {
        let backend = BackendClient::new(&config.backend)?;
        Ok(Self {
            config: Arc::new(config),
            backend,
        })
    }
}
