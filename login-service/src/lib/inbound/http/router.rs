use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use crate::domain::login::LoginDispatcher;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: LoginDispatcher,
}

pub fn create_router(dispatcher: LoginDispatcher) -> Router {
    let state = AppState { dispatcher };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/api/auth/login", post(login))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::StatusCode;
    use serde_json::json;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::login::ConfigurationError;
    use crate::domain::login::LoginHandlerBuilder;
    use crate::domain::login::LoginProvider;
    use crate::domain::login::LoginRequest;
    use crate::domain::login::LoginResult;
    use crate::domain::login::ProviderError;

    /// Answers with whatever the request's `reply` field says.
    struct EchoProvider;

    #[async_trait]
    impl LoginProvider for EchoProvider {
        async fn login(&self, request: &LoginRequest) -> Result<LoginResult, ProviderError> {
            match request.body().get("reply") {
                Some(Value::String(text)) => Ok(LoginResult::text(StatusCode::OK, text.clone())),
                Some(Value::Object(map)) => Ok(LoginResult::json(StatusCode::OK, map.clone())),
                Some(Value::Bool(true)) => Err(ProviderError::NotImplemented("echo")),
                _ => Ok(LoginResult::status(StatusCode::BAD_REQUEST)),
            }
        }
    }

    fn router() -> Router {
        let dispatcher = LoginHandlerBuilder::new()
            .add_provider("echo", |_: ()| Ok::<_, ConfigurationError>(EchoProvider), ())
            .unwrap()
            .build()
            .unwrap();

        create_router(dispatcher)
    }

    async fn post_login(body: Value) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/login")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|value| value.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, content_type, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_text_body() {
        let (status, content_type, body) =
            post_login(json!({ "type": "echo", "reply": "token" })).await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/plain"));
        assert_eq!(body, b"token");
    }

    #[tokio::test]
    async fn test_json_body() {
        let (status, content_type, body) =
            post_login(json!({ "type": "echo", "reply": { "token": "abc" } })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "token": "abc" }));
    }

    #[tokio::test]
    async fn test_no_body() {
        let (status, _, body) = post_login(json!({ "type": "echo" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_missing_type() {
        let (status, _, body) = post_login(json!({ "bad": "request" })).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, b"Authentication Provider not specified");
    }

    #[tokio::test]
    async fn test_provider_error_is_opaque() {
        let (status, _, body) = post_login(json!({ "type": "echo", "reply": true })).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({ "status_code": 500, "data": { "message": "Internal server error" } })
        );
    }
}
