//! Shared per-process context
//!
//! Built once in `main` and handed to every request handler, so the backend
//! client and its connection pool are reused instead of being recreated per
//! trigger.

use crate::api::BackendClient;
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct AppContext {
    pub backend: BackendClient,
}

impl AppContext {
    pub fn new(config: &Config) -> Self {
        let backend = BackendClient::new(&config.backend_url, config.auth_token.clone());
        Self { backend }
    }
}
