use async_trait::async_trait;

use crate::domain::completion::{CompletionRequest, CompletionResponse};
use crate::error::AppResult;

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Whether a credential is present. Checked before any request is issued.
    fn is_configured(&self) -> bool;

    async fn complete(&self, request: &CompletionRequest) -> AppResult<CompletionResponse>;
}
