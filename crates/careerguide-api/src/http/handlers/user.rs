//! User procedures.

use axum::Json;
use axum::extract::State;

use careerguide_types::user::User;

use crate::http::error::AppError;
use crate::http::extractors::auth::Caller;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// user.me - The caller's local user record.
pub async fn me(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let timer = RequestTimer::start();
    let user = state
        .user_service
        .get_user(caller.user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(timer.respond(user))
}
