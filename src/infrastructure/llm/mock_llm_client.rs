use std::sync::Mutex;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::GenerationRequest;

/// Scripted stand-in for the completion service; remembers every request it receives.
pub struct MockLlmClient {
    reply: Result<String, String>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockLlmClient {
    pub fn answering(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmClientError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        self.reply
            .clone()
            .map_err(LlmClientError::ApiRequestFailed)
    }
}
