pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_MAX_TOKENS: u32 = 50;
pub const ANSWER_STOP_SEQUENCE: &str = "\n";

/// User-tunable sampling knobs for one answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub stop_sequences: Vec<String>,
}

impl GenerationRequest {
    /// Builds the single-shot prompt that asks the model to answer from the documents.
    pub fn for_question(context: &str, question: &str, params: GenerationParams) -> Self {
        Self {
            prompt: format!("Documents: {context}\nQuestion: {question}\nAnswer:"),
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            stop_sequences: vec![ANSWER_STOP_SEQUENCE.to_string()],
        }
    }
}
