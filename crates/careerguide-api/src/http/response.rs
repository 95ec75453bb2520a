//! JSON envelope shared by every procedure, success or failure:
//! ```json
//! {
//!   "data": { ... },
//!   "meta": { "request_id": "...", "timestamp": "...", "response_time_ms": 5 },
//!   "errors": []
//! }
//! ```

use std::time::Instant;

use axum::Json;
use serde::Serialize;
use uuid::Uuid;

/// `{data, meta, errors}`; `data` is omitted on failure.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    pub meta: ApiMeta,

    /// Empty on success.
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Serialize)]
pub struct ApiMeta {
    /// UUID v7, so ids sort by time.
    pub request_id: String,
    pub timestamp: String,
    pub response_time_ms: u64,
}

/// One entry of `errors`.
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// `NOT_FOUND`, `VALIDATION_ERROR`, `UNAUTHORIZED` or `INTERNAL_ERROR`.
    pub code: String,
    pub message: String,
    /// For validation failures: `{"fieldErrors": {field: [message]}}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiMeta {
    fn new(request_id: String, response_time_ms: u64) -> Self {
        Self {
            request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
            response_time_ms,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, request_id: String, response_time_ms: u64) -> Self {
        Self {
            data: Some(data),
            meta: ApiMeta::new(request_id, response_time_ms),
            errors: Vec::new(),
        }
    }
}

impl ApiResponse<()> {
    /// Error envelopes are built outside any handler, so they carry a fresh id and no timing.
    pub fn error(code: &str, message: &str, details: Option<serde_json::Value>) -> Self {
        Self {
            data: None,
            meta: ApiMeta::new(Uuid::now_v7().to_string(), 0),
            errors: vec![ApiErrorDetail {
                code: code.to_string(),
                message: message.to_string(),
                details,
            }],
        }
    }
}

/// Per-request id and timer; turns handler output into an envelope.
pub struct RequestTimer {
    start: Instant,
    request_id: String,
}

impl RequestTimer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            request_id: Uuid::now_v7().to_string(),
        }
    }

    pub fn respond<T: Serialize>(self, data: T) -> Json<ApiResponse<T>> {
        let elapsed = self.start.elapsed().as_millis() as u64;
        Json(ApiResponse::success(data, self.request_id, elapsed))
    }
}
