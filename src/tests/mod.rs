//! Router test module
//!
//! Drives the full router against in-process stub upstreams

#[cfg(test)]
mod router_tests {
    use crate::config::settings::*;
    use crate::handlers::create_router_with_upstream;
    use crate::models::{UpstreamOutcome, UpstreamReply, UpstreamRequest};
    use crate::services::Upstream;
    use crate::utils::error::UpstreamError;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    const ACCESS_KEY: &str = "gate-secret";

    /// Upstream that records every request and replays a fixed outcome
    struct StubUpstream {
        calls: AtomicUsize,
        seen: Mutex<Vec<UpstreamRequest>>,
        outcome: UpstreamOutcome,
    }

    impl StubUpstream {
        fn replying(outcome: UpstreamOutcome) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
                outcome,
            })
        }

        fn ok(body: Value) -> Arc<Self> {
            Self::replying(Ok(UpstreamReply {
                status: StatusCode::OK,
                body,
            }))
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last(&self) -> UpstreamRequest {
            self.seen.lock().unwrap().last().cloned().expect("no upstream call")
        }
    }

    #[async_trait]
    impl Upstream for StubUpstream {
        async fn send(&self, request: &UpstreamRequest) -> UpstreamOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }
    }

    struct PanickingUpstream;

    #[async_trait]
    impl Upstream for PanickingUpstream {
        async fn send(&self, _request: &UpstreamRequest) -> UpstreamOutcome {
            panic!("upstream exploded")
        }
    }

    /// Create test settings
    fn create_test_settings() -> Settings {
        Settings {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            security: SecurityConfig {
                access_key: ACCESS_KEY.to_string(),
            },
            openai: ProviderConfig {
                api_key: "sk-test".to_string(),
                base_url: "http://openai.test/v1".to_string(),
                default_model: "gpt-4o-mini".to_string(),
            },
            gemini: ProviderConfig {
                api_key: "gm-key".to_string(),
                base_url: "http://gemini.test/v1beta/models/".to_string(),
                default_model: "gemini-pro".to_string(),
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: "text".to_string(),
                file: None,
            },
        }
    }

    fn app(upstream: Arc<dyn Upstream>) -> Router {
        create_router_with_upstream(create_test_settings(), upstream)
    }

    fn post(uri: &str, key: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(key) = key {
            builder = builder.header("X-API-KEY", key);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_or_wrong_key_never_reaches_upstream() {
        let upstream = StubUpstream::ok(json!({"ok": true}));
        let app = app(upstream.clone());

        for (uri, key) in [
            ("/api/openai", None),
            ("/api/openai/chat/completions", Some("wrong")),
            ("/v1/generate", Some("")),
        ] {
            let (status, body) = send(&app, post(uri, key, r#"{"input": "hi"}"#)).await;
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(
                body,
                json!({"error": "Forbidden", "message": "Invalid or missing API key"})
            );
        }

        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_openai_default_model_uses_chat_completions() {
        let upstream = StubUpstream::ok(json!({"id": "chatcmpl-1"}));
        let app = app(upstream.clone());

        let (status, body) = send(
            &app,
            post("/api/openai", Some(ACCESS_KEY), r#"{"messages": [{"role": "user", "content": "hi"}]}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": "chatcmpl-1"}));

        let request = upstream.last();
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.url, "http://openai.test/v1/chat/completions");
        assert_eq!(request.header("authorization"), Some("Bearer sk-test"));
    }

    #[tokio::test]
    async fn test_alias_route_matches_primary_route() {
        let upstream = StubUpstream::ok(json!({"id": "x"}));
        let app = app(upstream.clone());
        let body = r#"{"model": "text-davinci-003", "prompt": "hi"}"#;

        send(&app, post("/api/openai", Some(ACCESS_KEY), body)).await;
        let primary = upstream.last();
        send(&app, post("/api/openai/chat/completions", Some(ACCESS_KEY), body)).await;
        let alias = upstream.last();

        assert_eq!(primary.url, "http://openai.test/v1/engines/text-davinci-003/completions");
        assert_eq!(primary.url, alias.url);
        assert_eq!(primary.payload, alias.payload);
    }

    #[tokio::test]
    async fn test_gemini_request_shape() {
        let upstream = StubUpstream::ok(json!({"candidates": []}));
        let app = app(upstream.clone());

        let (status, _) = send(
            &app,
            post("/v1/generate", Some(ACCESS_KEY), r#"{"input": "hello", "model": "gemini-pro", "extra": 1}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let request = upstream.last();
        assert_eq!(
            serde_json::to_string(&request.payload).unwrap(),
            r#"{"contents":[{"parts":[{"text":"hello"}]}]}"#
        );
        assert!(request.url.contains("gemini-pro:generateContent?key=gm-key"));
    }

    #[tokio::test]
    async fn test_upstream_errors_are_normalized() {
        let upstream = StubUpstream::replying(Err(UpstreamError::Http {
            status: StatusCode::NOT_FOUND,
            message: r#"HTTP status client error (404 Not Found): {"error":"bad"}"#.to_string(),
        }));
        let app = app(upstream);

        let (status, body) = send(&app, post("/api/openai", Some(ACCESS_KEY), "{}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "HTTP Error");
        assert!(body["message"].as_str().unwrap().contains("bad"));

        let app = self::app(StubUpstream::replying(Err(UpstreamError::Connection(
            "error sending request: Connection refused".to_string(),
        ))));
        let (status, body) = send(&app, post("/v1/generate", Some(ACCESS_KEY), "{}")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Service Unavailable");
    }

    #[tokio::test]
    async fn test_same_request_twice_is_identical() {
        let upstream = StubUpstream::ok(json!({"choices": [{"text": "same"}]}));
        let app = app(upstream.clone());
        let body = r#"{"model": "gpt-4", "messages": []}"#;

        let first = send(&app, post("/api/openai", Some(ACCESS_KEY), body)).await;
        let second = send(&app, post("/api/openai", Some(ACCESS_KEY), body)).await;

        assert_eq!(first, second);
        assert_eq!(upstream.calls(), 2);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let upstream = StubUpstream::ok(json!({}));
        let app = app(upstream.clone());

        let (status, body) = send(&app, post("/api/unknown", Some(ACCESS_KEY), "{}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"error": "Not Found", "message": "The requested resource was not found"})
        );
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_wrong_method_returns_json() {
        let app = app(StubUpstream::ok(json!({})));
        let request = Request::builder()
            .method("GET")
            .uri("/v1/generate")
            .header("X-API-KEY", ACCESS_KEY)
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Method Not Allowed");
    }

    #[tokio::test]
    async fn test_malformed_inbound_is_internal_error() {
        let upstream = StubUpstream::ok(json!({}));
        let app = app(upstream.clone());

        for body in ["{not json", "[1, 2, 3]", r#"{"model": 42}"#] {
            let (status, envelope) = send(&app, post("/api/openai", Some(ACCESS_KEY), body)).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(envelope["error"], "Internal Server Error");
            assert!(envelope["message"].is_string());
        }

        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_panic_is_caught() {
        let app = app(Arc::new(PanickingUpstream));

        let (status, body) = send(&app, post("/api/openai", Some(ACCESS_KEY), "{}")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Internal Server Error", "message": "upstream exploded"})
        );
    }

    #[tokio::test]
    async fn test_large_body_is_forwarded() {
        let upstream = StubUpstream::ok(json!({"id": "big"}));
        let app = app(upstream.clone());

        let content = "x".repeat(3 * 1024 * 1024);
        let inbound = json!({"messages": [{"role": "user", "content": content}]});

        let (status, body) = send(
            &app,
            post("/api/openai", Some(ACCESS_KEY), &inbound.to_string()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": "big"}));
        assert_eq!(upstream.calls(), 1);
        assert_eq!(upstream.last().payload["messages"][0]["content"], content.as_str());
    }
}
