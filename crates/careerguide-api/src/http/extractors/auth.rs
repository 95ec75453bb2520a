//! Request boundary: resolves the caller before any handler code runs.
//!
//! Credentials are lifted from:
//! - `Authorization: Bearer <token>` header
//! - `X-Auth-Subject` / `X-Auth-Email` / `X-Auth-Name` proxy headers
//!
//! The configured `IdentityResolver` decides which of them count. A resolved
//! identity is upserted as a local user, whose id scopes every query.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use careerguide_infra::identity::headers::{EMAIL_HEADER, NAME_HEADER, SUBJECT_HEADER};
use careerguide_types::identity::{CallerResolution, RequestCredentials};
use careerguide_types::user::User;

use crate::http::error::AppError;
use crate::state::AppState;

/// The authenticated caller's local user record.
pub struct Caller {
    pub user: User,
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials = credentials_from_headers(&parts.headers);

        match state.identity.resolve_caller(&credentials) {
            CallerResolution::Authenticated(identity) => {
                let user = state.user_service.ensure_user(&identity).await?;
                Ok(Caller { user })
            }
            CallerResolution::Unauthenticated(reason) => {
                tracing::debug!(reason = %reason, "Rejected unauthenticated request");
                Err(AppError::Unauthorized("Authentication required".to_string()))
            }
        }
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Collect every credential the resolvers understand. Non-UTF-8 values are ignored.
pub fn credentials_from_headers(headers: &HeaderMap) -> RequestCredentials {
    let bearer_token = header(headers, "authorization").and_then(|auth| {
        auth.strip_prefix("Bearer ")
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    });

    RequestCredentials {
        bearer_token,
        forwarded_subject: header(headers, SUBJECT_HEADER),
        forwarded_email: header(headers, EMAIL_HEADER),
        forwarded_name: header(headers, NAME_HEADER),
    }
}
