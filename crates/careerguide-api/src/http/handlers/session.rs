//! Session procedures.
//!
//! - POST /api/rpc/session.list           - List the caller's sessions
//! - POST /api/rpc/session.create         - Create a session
//! - POST /api/rpc/session.updateTitle    - Rename an owned session
//! - POST /api/rpc/session.delete         - Delete an owned session
//! - POST /api/rpc/session.summarizeTitle - Suggest a title for messages

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use careerguide_types::chat::{ChatSession, SessionId, SessionSummary};
use careerguide_types::llm::Message;

use crate::http::error::AppError;
use crate::http::extractors::auth::Caller;
use crate::http::extractors::input::RpcInput;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSessionInput {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTitleInput {
    pub id: SessionId,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteSessionInput {
    pub id: SessionId,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeTitleInput {
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct DeleteOutput {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct TitleOutput {
    pub title: String,
}

/// session.list - Caller's sessions, most recently active first.
pub async fn list_sessions(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<SessionSummary>>>, AppError> {
    let timer = RequestTimer::start();
    let sessions = state.session_service.list(caller.user.id).await?;
    Ok(timer.respond(sessions.into_iter().map(SessionSummary::from).collect()))
}

/// session.create - Create a session; blank titles become "New Chat".
pub async fn create_session(
    State(state): State<AppState>,
    caller: Caller,
    RpcInput(input): RpcInput<CreateSessionInput>,
) -> Result<Json<ApiResponse<ChatSession>>, AppError> {
    let timer = RequestTimer::start();
    let session = state
        .session_service
        .create(caller.user.id, input.title.as_deref())
        .await?;
    Ok(timer.respond(session))
}

/// session.updateTitle - Rename an owned session.
pub async fn update_title(
    State(state): State<AppState>,
    caller: Caller,
    RpcInput(input): RpcInput<UpdateTitleInput>,
) -> Result<Json<ApiResponse<ChatSession>>, AppError> {
    let timer = RequestTimer::start();
    let session = state
        .session_service
        .update_title(caller.user.id, input.id, &input.title)
        .await?;
    Ok(timer.respond(session))
}

/// session.delete - Always `{ok: true}`, even when nothing matched.
pub async fn delete_session(
    State(state): State<AppState>,
    caller: Caller,
    RpcInput(input): RpcInput<DeleteSessionInput>,
) -> Result<Json<ApiResponse<DeleteOutput>>, AppError> {
    let timer = RequestTimer::start();
    state.session_service.delete(caller.user.id, input.id).await?;
    Ok(timer.respond(DeleteOutput { ok: true }))
}

/// session.summarizeTitle - Title suggestion; falls back to "New Conversation".
pub async fn summarize_title(
    State(state): State<AppState>,
    _caller: Caller,
    RpcInput(input): RpcInput<SummarizeTitleInput>,
) -> Result<Json<ApiResponse<TitleOutput>>, AppError> {
    let timer = RequestTimer::start();
    let generation = state.session_service.summarize_title(&input.messages).await?;
    Ok(timer.respond(TitleOutput {
        title: generation.into_text(),
    }))
}
