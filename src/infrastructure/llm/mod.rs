mod cohere_client;
mod mock_llm_client;

pub use cohere_client::{CohereClient, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT};
pub use mock_llm_client::MockLlmClient;
