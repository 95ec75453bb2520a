//! JSON procedure input.
//!
//! Like `axum::Json`, but an empty body decodes as `{}` (so procedures with
//! only optional fields accept no body) and decode failures use the API's
//! `VALIDATION_ERROR` envelope instead of axum's plain-text rejection.
//! Schema mismatches name the offending field; only bodies that are not
//! JSON at all are reported without field detail.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::http::error::AppError;

pub struct RpcInput<T>(pub T);

impl<S, T> FromRequest<S> for RpcInput<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {e}")))?;

        decode(&bytes).map(RpcInput)
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let body: &[u8] = if bytes.trim_ascii().is_empty() {
        b"{}"
    } else {
        bytes
    };

    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|_| AppError::BadRequest("Request body is not valid JSON".to_string()))?;

    serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        let (field, message) = describe(&path, &err.inner().to_string());
        AppError::InvalidField { field, message }
    })
}

/// Field name and client-facing message for a schema mismatch.
///
/// serde reports a missing field at the path of the enclosing object, with
/// the field's name only inside the message.
fn describe(path: &str, inner: &str) -> (String, String) {
    let parent = (path != ".").then_some(path);

    if let Some(name) = inner
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
    {
        let field = match parent {
            Some(parent) => format!("{parent}.{name}"),
            None => name.to_string(),
        };
        return (field, "Required".to_string());
    }

    let field = parent.unwrap_or("input").to_string();
    (field, inner.to_string())
}
