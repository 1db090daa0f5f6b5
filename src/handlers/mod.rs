//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod fallback;
pub mod proxy;

use crate::config::Settings;
use crate::middleware::{auth_middleware, request_logging_middleware};
use crate::providers::Providers;
use crate::services::{HttpUpstream, Upstream};
use anyhow::Result;
use axum::{extract::DefaultBodyLimit, middleware, routing::post, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Application state
///
/// Read-only after startup; shared by every request task.
pub struct AppState {
    pub settings: Settings,
    pub providers: Providers,
    pub upstream: Arc<dyn Upstream>,
}

/// Create application router backed by the real HTTP upstream
pub fn create_router(settings: Settings) -> Result<Router> {
    let upstream = Arc::new(HttpUpstream::new()?);
    Ok(create_router_with_upstream(settings, upstream))
}

/// Create application router with an explicit upstream transport
pub fn create_router_with_upstream(settings: Settings, upstream: Arc<dyn Upstream>) -> Router {
    let app_state = Arc::new(AppState {
        providers: Providers::from_settings(&settings),
        settings,
        upstream,
    });

    // Only matched proxy routes go through the auth gate; unknown paths fall through to 404
    let proxy_routes = Router::new()
        .route(
            "/api/openai",
            post(proxy::handle_openai).fallback(fallback::method_not_allowed),
        )
        .route(
            "/api/openai/chat/completions",
            post(proxy::handle_openai).fallback(fallback::method_not_allowed),
        )
        .route(
            "/v1/generate",
            post(proxy::handle_gemini).fallback(fallback::method_not_allowed),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // Create middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(fallback::panic_response));

    Router::new()
        .merge(proxy_routes)
        .fallback(fallback::not_found)
        .with_state(app_state)
        // Inbound bodies are forwarded whole; upstream enforces its own size limits
        .layer(DefaultBodyLimit::disable())
        .layer(middleware_stack)
}
