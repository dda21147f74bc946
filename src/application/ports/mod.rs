mod file_loader;
mod llm_client;

pub use file_loader::{ExtractionError, FileLoader};
pub use llm_client::{LlmClient, LlmClientError};
