use std::sync::Arc;

use docqa::application::ports::LlmClientError;
use docqa::application::services::{AnswerService, GenerationError};
use docqa::domain::GenerationParams;
use docqa::infrastructure::llm::MockLlmClient;

#[tokio::test]
async fn given_padded_completion_when_requesting_answer_then_strips_whitespace() {
    let client = Arc::new(MockLlmClient::answering("  Twelve percent. \n"));
    let service = AnswerService::new(Arc::clone(&client));

    let answer = service
        .request_answer(
            "Revenue grew twelve percent.",
            "How much did revenue grow?",
            GenerationParams::default(),
        )
        .await
        .unwrap();

    assert_eq!(answer, "Twelve percent.");
}

#[tokio::test]
async fn given_question_when_requesting_answer_then_sends_templated_prompt_and_params() {
    let client = Arc::new(MockLlmClient::answering("Yes"));
    let service = AnswerService::new(Arc::clone(&client));
    let params = GenerationParams {
        temperature: 0.8,
        max_tokens: 200,
    };

    service
        .request_answer("The board approved.", "Was it approved?", params)
        .await
        .unwrap();

    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].prompt,
        "Documents: The board approved.\nQuestion: Was it approved?\nAnswer:"
    );
    assert_eq!(requests[0].temperature, 0.8);
    assert_eq!(requests[0].max_tokens, 200);
    assert_eq!(requests[0].stop_sequences, vec!["\n".to_string()]);
}

#[tokio::test]
async fn given_failing_service_when_requesting_answer_then_returns_generation_error() {
    let client = Arc::new(MockLlmClient::failing("invalid api token"));
    let service = AnswerService::new(client);

    let result = service
        .request_answer("ctx", "q", GenerationParams::default())
        .await;

    assert!(matches!(
        result,
        Err(GenerationError::Completion(LlmClientError::ApiRequestFailed(ref message)))
            if message == "invalid api token"
    ));
}
