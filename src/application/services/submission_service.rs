use std::fmt;
use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::{ConversationEntry, ConversationLog, GenerationParams, UploadedDocument};

use super::answer_service::{AnswerService, GenerationError};
use super::context_assembler::assemble_context;
use super::document_extractor::{DocumentExtractor, ExtractionFailure};

pub const DEFAULT_MAX_TOKENS_LIMIT: u32 = 1000;

/// Everything the user sends for one question.
#[derive(Debug, Clone)]
pub struct Submission {
    pub documents: Vec<UploadedDocument>,
    pub question: String,
    pub params: GenerationParams,
}

#[derive(Debug, Clone)]
pub struct Answered {
    pub number: usize,
    pub entry: ConversationEntry,
    pub extraction_failures: Vec<ExtractionFailure>,
    pub context_bytes: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct SubmissionLimits {
    pub max_context_bytes: usize,
    pub max_tokens_limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Validating,
    Extracting,
    Assembling,
    Requesting,
    Appended,
    Failed,
}

impl SubmissionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStage::Validating => "VALIDATING",
            SubmissionStage::Extracting => "EXTRACTING",
            SubmissionStage::Assembling => "ASSEMBLING",
            SubmissionStage::Requesting => "REQUESTING",
            SubmissionStage::Appended => "APPENDED",
            SubmissionStage::Failed => "FAILED",
        }
    }
}

impl fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub struct SubmissionService<L>
where
    L: LlmClient,
{
    extractor: DocumentExtractor,
    answer_service: AnswerService<L>,
    limits: SubmissionLimits,
}

impl<L> SubmissionService<L>
where
    L: LlmClient,
{
    pub fn new(
        file_loader: Arc<dyn FileLoader>,
        llm_client: Arc<L>,
        limits: SubmissionLimits,
    ) -> Self {
        Self {
            extractor: DocumentExtractor::new(file_loader),
            answer_service: AnswerService::new(llm_client),
            limits,
        }
    }

    /// Runs one question through validation, extraction, assembly and generation.
    ///
    /// Exactly one entry is appended to `log` on success and none on failure.
    #[tracing::instrument(
        skip(self, log, submission),
        fields(documents = submission.documents.len(), history_len = log.len())
    )]
    pub async fn handle_submission(
        &self,
        log: &mut ConversationLog,
        submission: Submission,
    ) -> Result<Answered, SubmissionError> {
        enter(SubmissionStage::Validating);
        if let Err(e) = self.validate(&submission) {
            tracing::info!(error = %e, "Submission rejected");
            enter(SubmissionStage::Failed);
            return Err(e.into());
        }

        enter(SubmissionStage::Extracting);
        let mut texts = Vec::with_capacity(submission.documents.len());
        let mut extraction_failures = Vec::new();
        for document in &submission.documents {
            let extracted = self.extractor.extract(document).await;
            if let Some(failure) = extracted.failure {
                extraction_failures.push(failure);
            }
            texts.push(extracted.text);
        }

        enter(SubmissionStage::Assembling);
        let context = assemble_context(&texts, self.limits.max_context_bytes);

        enter(SubmissionStage::Requesting);
        let answer = match self
            .answer_service
            .request_answer(&context, &submission.question, submission.params)
            .await
        {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!(error = %e, "Answer generation failed");
                enter(SubmissionStage::Failed);
                return Err(e.into());
            }
        };

        let entry = log.append(submission.question, answer).clone();
        enter(SubmissionStage::Appended);
        tracing::info!(
            number = log.len(),
            failed_documents = extraction_failures.len(),
            context_bytes = context.len(),
            "Submission answered"
        );

        Ok(Answered {
            number: log.len(),
            entry,
            extraction_failures,
            context_bytes: context.len(),
        })
    }

    fn validate(&self, submission: &Submission) -> Result<(), ValidationError> {
        if submission.documents.is_empty() {
            return Err(ValidationError::NoDocuments);
        }
        if submission.question.trim().is_empty() {
            return Err(ValidationError::MissingQuestion);
        }

        let temperature = submission.params.temperature;
        if !(0.0..=1.0).contains(&temperature) {
            return Err(ValidationError::TemperatureOutOfRange(temperature));
        }

        let max_tokens = submission.params.max_tokens;
        if max_tokens == 0 || max_tokens > self.limits.max_tokens_limit {
            return Err(ValidationError::MaxTokensOutOfRange {
                value: max_tokens,
                limit: self.limits.max_tokens_limit,
            });
        }

        Ok(())
    }
}

fn enter(stage: SubmissionStage) {
    tracing::debug!(%stage, "Submission stage");
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("no documents uploaded")]
    NoDocuments,
    #[error("no question provided")]
    MissingQuestion,
    #[error("temperature must be between 0.0 and 1.0, got {0}")]
    TemperatureOutOfRange(f32),
    #[error("max_tokens must be between 1 and {limit}, got {value}")]
    MaxTokensOutOfRange { value: u32, limit: u32 },
}

impl ValidationError {
    /// True when the user left out documents or the question entirely.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::NoDocuments | Self::MissingQuestion)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("generation: {0}")]
    Generation(#[from] GenerationError),
}
