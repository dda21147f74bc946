mod answer_service;
mod context_assembler;
mod document_extractor;
mod session_registry;
mod submission_service;

pub use answer_service::{AnswerService, GenerationError};
pub use context_assembler::{DEFAULT_MAX_CONTEXT_BYTES, assemble_context};
pub use document_extractor::{DocumentExtractor, ExtractedText, ExtractionFailure};
pub use session_registry::{SessionHandle, SessionRegistry};
pub use submission_service::{
    Answered, DEFAULT_MAX_TOKENS_LIMIT, Submission, SubmissionError, SubmissionLimits,
    SubmissionService, SubmissionStage, ValidationError,
};
