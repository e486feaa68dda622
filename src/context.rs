use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::CompletionService;
use crate::workflow::classify::TicketClassifier;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub classifier: TicketClassifier,
}

impl AppContext {
    pub fn new(config: AppConfig, completion: Arc<dyn CompletionService>) -> Self {
        Self {
            config,
            classifier: TicketClassifier::new(completion),
        }
    }
}
