//! Axum router configuration with middleware.
//!
//! All procedures are `POST /api/rpc/<procedure>` with a JSON body.
//! Middleware: CORS, tracing, gzip compression.

use axum::Router;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::error::AppError;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all procedures and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let rpc_routes = Router::new()
        // Sessions
        .route("/session.list", post(handlers::session::list_sessions))
        .route("/session.create", post(handlers::session::create_session))
        .route("/session.updateTitle", post(handlers::session::update_title))
        .route("/session.delete", post(handlers::session::delete_session))
        .route(
            "/session.summarizeTitle",
            post(handlers::session::summarize_title),
        )
        // Messages
        .route("/message.list", post(handlers::message::list_messages))
        .route("/message.sendMessage", post(handlers::message::send_message))
        // Users
        .route("/user.me", post(handlers::user::me))
        .fallback(unknown_procedure);

    Router::new()
        .nest("/api/rpc", rpc_routes)
        .route("/health", get(handlers::health::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}

async fn unknown_procedure() -> AppError {
    AppError::NotFound("Unknown procedure".to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use careerguide_core::llm::box_provider::BoxLlmProvider;
    use careerguide_core::llm::fallback::FallbackChain;
    use careerguide_core::llm::provider::LlmProvider;
    use careerguide_core::llm::reply::{REPLY_FALLBACK, ReplyGenerator};
    use careerguide_core::llm::title::TitleGenerator;
    use careerguide_infra::identity::headers::TrustedHeaderResolver;
    use careerguide_infra::identity::signed_token::{SignedTokenResolver, sign_token};
    use careerguide_infra::sqlite::pool::DatabasePool;
    use careerguide_types::identity::TokenClaims;
    use careerguide_types::llm::{
        CompletionRequest, CompletionResponse, GenerationParams, LlmError,
    };

    use super::*;

    /// Provider that answers every request with the same text.
    struct FixedProvider(&'static str);

    impl LlmProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn model(&self) -> &str {
            "fixed-model"
        }

        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse {
                content: self.0.to_string(),
                model: "fixed-model".to_string(),
                finish_reason: None,
            })
        }
    }

    fn params() -> GenerationParams {
        GenerationParams {
            temperature: 0.7,
            max_output_tokens: 64,
            timeout: Duration::from_secs(5),
        }
    }

    fn chain(text: Option<&'static str>) -> FallbackChain {
        match text {
            Some(text) => FallbackChain::new(vec![BoxLlmProvider::new(FixedProvider(text))]),
            None => FallbackChain::default(),
        }
    }

    struct TestApp {
        router: Router,
        _dir: tempfile::TempDir,
    }

    async fn app_with(
        reply: Option<&'static str>,
        title: Option<&'static str>,
        identity: Arc<dyn careerguide_core::identity::IdentityResolver>,
    ) -> TestApp {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("api.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        let state = AppState::from_parts(
            pool,
            ReplyGenerator::new(chain(reply), params()),
            TitleGenerator::new(chain(title), params()),
            identity,
        );
        TestApp {
            router: build_router(state),
            _dir: dir,
        }
    }

    async fn app() -> TestApp {
        app_with(
            Some("## Plan\n- Learn JavaScript first"),
            Some("Frontend Career Path"),
            Arc::new(TrustedHeaderResolver),
        )
        .await
    }

    impl TestApp {
        async fn call(&self, procedure: &str, user: Option<&str>, body: &str) -> (StatusCode, Value) {
            let mut builder = Request::builder()
                .method("POST")
                .uri(format!("/api/rpc/{procedure}"))
                .header("content-type", "application/json");
            if let Some(user) = user {
                builder = builder.header("x-auth-subject", user);
            }
            let request = builder.body(Body::from(body.to_string())).unwrap();
            self.send(request).await
        }

        async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        async fn create_session(&self, user: &str) -> i64 {
            let (status, body) = self.call("session.create", Some(user), "").await;
            assert_eq!(status, StatusCode::OK);
            body["data"]["id"].as_i64().unwrap()
        }
    }

    #[tokio::test]
    async fn test_health_needs_no_auth() {
        let app = app().await;
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = app.send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unauthenticated_rejected() {
        let app = app().await;
        for procedure in ["session.list", "session.create", "message.sendMessage", "user.me"] {
            let (status, body) = app.call(procedure, None, "{}").await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{procedure}");
            assert_eq!(body["errors"][0]["code"], "UNAUTHORIZED");
        }
    }

    #[tokio::test]
    async fn test_create_and_list_sessions() {
        let app = app().await;
        let (status, created) = app.call("session.create", Some("alice"), "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["data"]["title"], "New Chat");
        assert!(created["meta"]["request_id"].is_string());

        let (_, titled) = app
            .call("session.create", Some("alice"), r#"{"title":"Interview prep"}"#)
            .await;
        assert_eq!(titled["data"]["title"], "Interview prep");

        let (status, listed) = app.call("session.list", Some("alice"), "").await;
        assert_eq!(status, StatusCode::OK);
        let sessions = listed["data"].as_array().unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0]["title"], "Interview prep");
        assert!(sessions[0].get("createdAt").is_some());
        assert!(sessions[0].get("userId").is_none());
    }

    #[tokio::test]
    async fn test_send_message_first_exchange() {
        let app = app().await;
        let session_id = app.create_session("alice").await;

        let body = json!({
            "sessionId": session_id,
            "content": "I want to learn React and get a frontend job."
        })
        .to_string();
        let (status, exchange) = app.call("message.sendMessage", Some("alice"), &body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(exchange["data"]["user"]["role"], "user");
        assert_eq!(exchange["data"]["assistant"]["role"], "assistant");
        assert_eq!(
            exchange["data"]["assistant"]["content"],
            "## Plan\n- Learn JavaScript first"
        );

        let (_, listed) = app.call("session.list", Some("alice"), "").await;
        assert_eq!(listed["data"][0]["title"], "Frontend Career Path");

        let body = json!({ "sessionId": session_id }).to_string();
        let (_, messages) = app.call("message.list", Some("alice"), &body).await;
        let messages = messages["data"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["sessionId"], session_id);
        assert_eq!(
            messages[0]["content"],
            "I want to learn React and get a frontend job."
        );
    }

    #[tokio::test]
    async fn test_degraded_generation_uses_fallbacks() {
        let app = app_with(None, None, Arc::new(TrustedHeaderResolver)).await;
        let session_id = app.create_session("alice").await;

        let body = json!({ "sessionId": session_id, "content": "How do I switch careers?" }).to_string();
        let (status, exchange) = app.call("message.sendMessage", Some("alice"), &body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(exchange["data"]["assistant"]["content"], REPLY_FALLBACK);

        // Title falls back to the first message text.
        let (_, listed) = app.call("session.list", Some("alice"), "").await;
        assert_eq!(listed["data"][0]["title"], "How do I switch careers?");

        let body = json!({ "messages": [{ "role": "user", "content": "hello" }] }).to_string();
        let (status, title) = app.call("session.summarizeTitle", Some("alice"), &body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(title["data"]["title"], "New Conversation");
    }

    #[tokio::test]
    async fn test_cross_user_isolation() {
        let app = app().await;
        let session_id = app.create_session("alice").await;
        let send = json!({ "sessionId": session_id, "content": "hi" }).to_string();
        app.call("message.sendMessage", Some("alice"), &send).await;

        let (status, body) = app.call("message.sendMessage", Some("bob"), &send).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"][0]["code"], "NOT_FOUND");

        let list = json!({ "sessionId": session_id }).to_string();
        let (status, body) = app.call("message.list", Some("bob"), &list).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));

        let rename = json!({ "id": session_id, "title": "mine now" }).to_string();
        let (status, _) = app.call("session.updateTitle", Some("bob"), &rename).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let delete = json!({ "id": session_id }).to_string();
        let (status, body) = app.call("session.delete", Some("bob"), &delete).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["ok"], true);

        let (_, body) = app.call("session.list", Some("bob"), "").await;
        assert_eq!(body["data"], json!([]));
        let (_, body) = app.call("message.list", Some("alice"), &list).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let app = app().await;
        let session_id = app.create_session("alice").await;
        let delete = json!({ "id": session_id }).to_string();

        for _ in 0..2 {
            let (status, body) = app.call("session.delete", Some("alice"), &delete).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["data"]["ok"], true);
        }
        let (_, body) = app.call("session.list", Some("alice"), "").await;
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let app = app().await;
        let session_id = app.create_session("alice").await;

        let rename = json!({ "id": session_id, "title": "   " }).to_string();
        let (status, body) = app.call("session.updateTitle", Some("alice"), &rename).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");
        assert!(body["errors"][0]["details"]["fieldErrors"]["title"].is_array());

        let send = json!({ "sessionId": session_id, "content": "" }).to_string();
        let (status, body) = app.call("message.sendMessage", Some("alice"), &send).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"][0]["details"]["fieldErrors"]["content"].is_array());

        let missing = json!({ "sessionId": session_id }).to_string();
        let (status, body) = app.call("message.sendMessage", Some("alice"), &missing).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["errors"][0]["details"]["fieldErrors"]["content"][0],
            "Required"
        );

        let wrong_type = json!({ "id": "first", "title": "x" }).to_string();
        let (status, body) = app.call("session.updateTitle", Some("alice"), &wrong_type).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"][0]["details"]["fieldErrors"]["id"].is_array());

        let (status, body) = app.call("session.updateTitle", Some("alice"), "{oops").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");
        assert!(body["errors"][0].get("details").is_none());

        let (status, body) = app.call("session.summarizeTitle", Some("alice"), r#"{"messages":[]}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["title"], "New Conversation");
    }

    #[tokio::test]
    async fn test_signed_token_user_me() {
        let app = app_with(
            None,
            None,
            Arc::new(SignedTokenResolver::new("router-secret".to_string().into())),
        )
        .await;
        let token = sign_token(
            b"router-secret",
            &TokenClaims {
                sub: "user_42".into(),
                email: Some("grace@example.com".into()),
                name: Some("Grace".into()),
                exp: None,
            },
        )
        .unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/api/rpc/user.me")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = app.send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["authId"], "user_42");
        assert_eq!(body["data"]["email"], "grace@example.com");

        // Proxy headers mean nothing in signed-token mode.
        let (status, _) = app.call("user.me", Some("user_42"), "").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_procedure() {
        let app = app().await;
        let (status, body) = app.call("session.archive", Some("alice"), "{}").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"][0]["code"], "NOT_FOUND");
    }
}
