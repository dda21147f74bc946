use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ports::LlmClient;
use crate::application::services::{Submission, SubmissionError};
use crate::domain::{ContentType, GenerationParams, UploadedDocument};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::error_response;
use super::sessions::find_session;

const MISSING_INPUT_MESSAGE: &str = "Please upload documents and enter a question.";

#[derive(Serialize)]
pub struct AnswerResponse {
    pub number: usize,
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
    pub context_bytes: usize,
    pub extraction_errors: Vec<ExtractionErrorBody>,
}

#[derive(Serialize)]
pub struct ExtractionErrorBody {
    pub filename: String,
    pub error: String,
}

#[derive(Default)]
struct QuestionForm {
    documents: Vec<UploadedDocument>,
    question: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

/// Accepts `files` parts plus `question`, `temperature` and `max_tokens` fields.
#[tracing::instrument(skip(state, multipart))]
pub async fn ask_question_handler<L>(
    State(state): State<AppState<L>>,
    Path(session_id): Path<String>,
    mut multipart: Multipart,
) -> Response
where
    L: LlmClient + 'static,
{
    let (session_id, session) = match find_session(&state, &session_id).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(message) => {
            tracing::warn!(error = %message, "Rejected question form");
            return error_response(StatusCode::BAD_REQUEST, message);
        }
    };

    let submission = Submission {
        documents: form.documents,
        question: form.question.unwrap_or_default(),
        params: GenerationParams {
            temperature: form
                .temperature
                .unwrap_or(state.generation_defaults.temperature),
            max_tokens: form
                .max_tokens
                .unwrap_or(state.generation_defaults.max_tokens),
        },
    };

    tracing::debug!(
        session_id = %session_id,
        question = %sanitize_prompt(&submission.question),
        documents = submission.documents.len(),
        "Processing question"
    );

    let mut log = session.lock().await;
    match state
        .submission_service
        .handle_submission(&mut log, submission)
        .await
    {
        Ok(answered) => {
            let extraction_errors = answered
                .extraction_failures
                .into_iter()
                .map(|f| ExtractionErrorBody {
                    filename: f.filename,
                    error: f.message,
                })
                .collect();

            (
                StatusCode::OK,
                Json(AnswerResponse {
                    number: answered.number,
                    question: answered.entry.question,
                    answer: answered.entry.answer,
                    asked_at: answered.entry.asked_at,
                    context_bytes: answered.context_bytes,
                    extraction_errors,
                }),
            )
                .into_response()
        }
        Err(SubmissionError::Validation(e)) if e.is_missing_input() => {
            error_response(StatusCode::BAD_REQUEST, MISSING_INPUT_MESSAGE)
        }
        Err(SubmissionError::Validation(e)) => {
            error_response(StatusCode::BAD_REQUEST, format!("Invalid request: {}", e))
        }
        Err(SubmissionError::Generation(e)) => error_response(
            StatusCode::BAD_GATEWAY,
            format!("Error generating answer: {}", e),
        ),
    }
}

async fn read_form(multipart: &mut Multipart) -> Result<QuestionForm, String> {
    let mut form = QuestionForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read multipart: {}", e))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "files" | "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let declared = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read file {}: {}", filename, e))?;

                // Browsers submit an empty, nameless part when nothing was picked.
                if filename.is_empty() && data.is_empty() {
                    continue;
                }

                tracing::debug!(
                    filename = %filename,
                    content_type = %declared,
                    bytes = data.len(),
                    "File received"
                );
                form.documents.push(UploadedDocument::new(
                    filename,
                    ContentType::from_mime(&declared),
                    data.to_vec(),
                ));
            }
            "question" => form.question = Some(read_text(field).await?),
            "temperature" => {
                let raw = read_text(field).await?;
                form.temperature = Some(
                    raw.trim()
                        .parse()
                        .map_err(|_| format!("Invalid temperature: {}", raw))?,
                );
            }
            "max_tokens" => {
                let raw = read_text(field).await?;
                form.max_tokens = Some(
                    raw.trim()
                        .parse()
                        .map_err(|_| format!("Invalid max_tokens: {}", raw))?,
                );
            }
            other => tracing::debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, String> {
    let name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|e| format!("Failed to read field {}: {}", name, e))
}
