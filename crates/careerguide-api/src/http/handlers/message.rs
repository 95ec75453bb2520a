//! Message procedures.
//!
//! - POST /api/rpc/message.list        - Messages of an owned session
//! - POST /api/rpc/message.sendMessage - Send a message and get the reply

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use careerguide_types::chat::{ChatMessage, Exchange, SessionId};

use crate::http::error::AppError;
use crate::http::extractors::auth::Caller;
use crate::http::extractors::input::RpcInput;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesInput {
    pub session_id: SessionId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageInput {
    pub session_id: SessionId,
    pub content: String,
}

/// message.list - Oldest first; empty for sessions the caller does not own.
pub async fn list_messages(
    State(state): State<AppState>,
    caller: Caller,
    RpcInput(input): RpcInput<ListMessagesInput>,
) -> Result<Json<ApiResponse<Vec<ChatMessage>>>, AppError> {
    let timer = RequestTimer::start();
    let messages = state
        .message_service
        .list(caller.user.id, input.session_id)
        .await?;
    Ok(timer.respond(messages))
}

/// message.sendMessage - Persist the message, generate and persist the reply.
pub async fn send_message(
    State(state): State<AppState>,
    caller: Caller,
    RpcInput(input): RpcInput<SendMessageInput>,
) -> Result<Json<ApiResponse<Exchange>>, AppError> {
    let timer = RequestTimer::start();
    let exchange = state
        .message_service
        .send_message(caller.user.id, input.session_id, &input.content)
        .await?;
    Ok(timer.respond(exchange))
}
