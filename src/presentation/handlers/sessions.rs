use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ports::LlmClient;
use crate::application::services::SessionHandle;
use crate::domain::SessionId;
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: String,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Serialize)]
pub struct HistoryEntry {
    pub number: usize,
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

#[tracing::instrument(skip(state))]
pub async fn create_session_handler<L>(State(state): State<AppState<L>>) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let session_id = state.sessions.create().await;
    tracing::info!(session_id = %session_id, "Session started");

    (
        StatusCode::CREATED,
        Json(SessionCreatedResponse {
            session_id: session_id.to_string(),
        }),
    )
}

#[tracing::instrument(skip(state))]
pub async fn history_handler<L>(
    State(state): State<AppState<L>>,
    Path(session_id): Path<String>,
) -> Response
where
    L: LlmClient + 'static,
{
    let (session_id, session) = match find_session(&state, &session_id).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let log = session.lock().await;
    let entries = log
        .all()
        .iter()
        .enumerate()
        .map(|(index, entry)| HistoryEntry {
            number: index + 1,
            question: entry.question.clone(),
            answer: entry.answer.clone(),
            asked_at: entry.asked_at,
        })
        .collect();

    (
        StatusCode::OK,
        Json(HistoryResponse {
            session_id: session_id.to_string(),
            entries,
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn delete_session_handler<L>(
    State(state): State<AppState<L>>,
    Path(session_id): Path<String>,
) -> Response
where
    L: LlmClient + 'static,
{
    let (session_id, _) = match find_session(&state, &session_id).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    if !state.sessions.remove(session_id).await {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Session not found: {}", session_id),
        );
    }

    tracing::info!(session_id = %session_id, "Session ended");
    StatusCode::NO_CONTENT.into_response()
}

/// Resolves a path segment to a live session, or the 404 to send back.
pub(super) async fn find_session<L>(
    state: &AppState<L>,
    raw_id: &str,
) -> Result<(SessionId, SessionHandle), Response>
where
    L: LlmClient + 'static,
{
    let not_found = || {
        tracing::warn!(session_id = %raw_id, "Unknown session");
        error_response(
            StatusCode::NOT_FOUND,
            format!("Session not found: {}", raw_id),
        )
    };

    let session_id: SessionId = raw_id.parse().map_err(|_| not_found())?;
    let session = state.sessions.get(session_id).await.ok_or_else(not_found)?;

    Ok((session_id, session))
}
