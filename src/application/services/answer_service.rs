use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{GenerationParams, GenerationRequest};

pub struct AnswerService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
}

impl<L> AnswerService<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>) -> Self {
        Self { llm_client }
    }

    #[tracing::instrument(
        skip(self, context, question),
        fields(context_bytes = context.len(), temperature = params.temperature, max_tokens = params.max_tokens)
    )]
    pub async fn request_answer(
        &self,
        context: &str,
        question: &str,
        params: GenerationParams,
    ) -> Result<String, GenerationError> {
        let request = GenerationRequest::for_question(context, question, params);

        let text = self.llm_client.generate(&request).await?;
        let answer = text.trim().to_string();

        tracing::debug!(answer_bytes = answer.len(), "Answer generated");
        Ok(answer)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
}
