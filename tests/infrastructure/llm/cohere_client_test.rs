use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use docqa::application::ports::{LlmClient, LlmClientError};
use docqa::domain::{GenerationParams, GenerationRequest};
use docqa::infrastructure::llm::CohereClient;

#[derive(Default, Clone)]
struct Captured {
    body: Arc<Mutex<Option<serde_json::Value>>>,
    authorization: Arc<Mutex<Option<String>>>,
}

async fn start_mock_cohere_server(
    response_status: u16,
    response_body: &'static str,
    delay: Duration,
) -> (String, Captured, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let captured = Captured::default();
    let sink = captured.clone();

    let app = Router::new().route(
        "/v1/generate",
        post(move |headers: HeaderMap, Json(body): Json<serde_json::Value>| {
            let sink = sink.clone();
            async move {
                *sink.body.lock().unwrap() = Some(body);
                *sink.authorization.lock().unwrap() = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from);
                tokio::time::sleep(delay).await;
                let status = StatusCode::from_u16(response_status).unwrap();
                (status, response_body).into_response()
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, captured, shutdown_tx)
}

fn request() -> GenerationRequest {
    GenerationRequest::for_question(
        "Revenue grew twelve percent.",
        "How much?",
        GenerationParams {
            temperature: 0.3,
            max_tokens: 40,
        },
    )
}

fn client(base_url: &str, timeout: Duration) -> CohereClient {
    CohereClient::new(base_url, "test-key", "command", timeout).unwrap()
}

#[tokio::test]
async fn given_successful_generation_when_generating_then_returns_first_text_untrimmed() {
    let body = r#"{"id": "g1", "generations": [{"id": "a", "text": " Twelve percent."}]}"#;
    let (base_url, _, shutdown_tx) = start_mock_cohere_server(200, body, Duration::ZERO).await;

    let result = client(&base_url, Duration::from_secs(5))
        .generate(&request())
        .await;

    assert_eq!(result.unwrap(), " Twelve percent.");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_request_when_generating_then_forwards_parameters_and_bearer_key() {
    let body = r#"{"generations": [{"text": "ok"}]}"#;
    let (base_url, captured, shutdown_tx) =
        start_mock_cohere_server(200, body, Duration::ZERO).await;

    client(&format!("{base_url}/"), Duration::from_secs(5))
        .generate(&request())
        .await
        .unwrap();

    let sent = captured.body.lock().unwrap().clone().unwrap();
    assert_eq!(sent["model"], "command");
    assert_eq!(
        sent["prompt"],
        "Documents: Revenue grew twelve percent.\nQuestion: How much?\nAnswer:"
    );
    assert_eq!(sent["max_tokens"], 40);
    assert!((sent["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    assert_eq!(sent["stop_sequences"], serde_json::json!(["\n"]));
    assert_eq!(
        captured.authorization.lock().unwrap().as_deref(),
        Some("Bearer test-key")
    );
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_rate_limit_status_when_generating_then_returns_rate_limited() {
    let (base_url, _, shutdown_tx) =
        start_mock_cohere_server(429, r#"{"message": "slow down"}"#, Duration::ZERO).await;

    let result = client(&base_url, Duration::from_secs(5))
        .generate(&request())
        .await;

    assert!(matches!(result, Err(LlmClientError::RateLimited)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_server_error_when_generating_then_returns_api_error_with_body() {
    let (base_url, _, shutdown_tx) =
        start_mock_cohere_server(401, r#"{"message": "invalid api token"}"#, Duration::ZERO)
            .await;

    let result = client(&base_url, Duration::from_secs(5))
        .generate(&request())
        .await;

    match result {
        Err(LlmClientError::ApiRequestFailed(message)) => {
            assert!(message.contains("401"));
            assert!(message.contains("invalid api token"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_generations_when_generating_then_returns_invalid_response() {
    let (base_url, _, shutdown_tx) =
        start_mock_cohere_server(200, r#"{"generations": []}"#, Duration::ZERO).await;

    let result = client(&base_url, Duration::from_secs(5))
        .generate(&request())
        .await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_malformed_body_when_generating_then_returns_invalid_response() {
    let (base_url, _, shutdown_tx) =
        start_mock_cohere_server(200, "not json", Duration::ZERO).await;

    let result = client(&base_url, Duration::from_secs(5))
        .generate(&request())
        .await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_slow_server_when_generating_then_returns_timeout() {
    let body = r#"{"generations": [{"text": "late"}]}"#;
    let (base_url, _, shutdown_tx) =
        start_mock_cohere_server(200, body, Duration::from_secs(3)).await;

    let result = client(&base_url, Duration::from_millis(200))
        .generate(&request())
        .await;

    assert!(matches!(result, Err(LlmClientError::Timeout)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unreachable_server_when_generating_then_returns_api_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client(&format!("http://{addr}"), Duration::from_secs(5))
        .generate(&request())
        .await;

    assert!(matches!(result, Err(LlmClientError::ApiRequestFailed(_))));
}
