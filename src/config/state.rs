// Application state module
// Shared, read-only state handed to every connection task

use std::sync::Arc;

use super::types::Config;
use crate::logger::RequestLog;

/// Application state
pub struct AppState {
    pub config: Config,
    pub request_log: Arc<dyn RequestLog>,
}

impl AppState {
    pub fn new(config: Config, request_log: Arc<dyn RequestLog>) -> Self {
        Self {
            config,
            request_log,
        }
    }
}
