//! Translation service.
//!
//! `POST /compile` takes and returns JSON objects:
//!
//! ```text
//! -> {"code": "x = 5\n"}
//! <- {"output_code": "let x = 5;\n", "error": null}
//! ```
//!
//! Source that fails the pre-check is never translated; the diagnostics are
//! returned in `error` instead. Every failure, including a malformed body or
//! a timeout, is answered with a response frame. Cross-origin requests are
//! allowed from anywhere.
//!
//! A request that times out is answered right away. Its translation cannot
//! be interrupted, so it finishes on the blocking pool and the result is
//! dropped.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::StringRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use crate::{TranslateOptions, check_and_translate};

/// Default time one request may spend translating.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default limit on the size of a request body.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

// ============================================================================
// Frames
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileRequest {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileResponse {
    pub output_code: String,
    pub error: Option<String>,
}

impl CompileResponse {
    pub fn success(output_code: String) -> Self {
        Self {
            output_code,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            output_code: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Pre-check and translate one request with default options.
pub fn handle(request: &CompileRequest) -> CompileResponse {
    handle_with(request, &TranslateOptions::default())
}

pub fn handle_with(request: &CompileRequest, options: &TranslateOptions) -> CompileResponse {
    match check_and_translate(&request.code, options.clone()) {
        Ok(output_code) => CompileResponse::success(output_code),
        Err(error) => CompileResponse::failure(error.to_string()),
    }
}

/// Decode one JSON frame and handle it.
pub fn handle_frame(frame: &str, options: &TranslateOptions) -> CompileResponse {
    match serde_json::from_str::<CompileRequest>(frame) {
        Ok(request) => handle_with(&request, options),
        Err(error) => CompileResponse::failure(format!("malformed request: {error}")),
    }
}

// ============================================================================
// Transport
// ============================================================================

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub addr: SocketAddr,
    pub timeout: Duration,
    pub max_body_bytes: usize,
    pub options: TranslateOptions,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            timeout: DEFAULT_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            options: TranslateOptions::default(),
        }
    }
}

/// The `/compile` route with permissive CORS.
pub fn router(config: ServiceConfig) -> Router {
    let limit = config.max_body_bytes;
    Router::new()
        .route("/compile", post(compile))
        .layer(DefaultBodyLimit::max(limit))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(config))
}

/// Bind `config.addr` and serve until the process exits.
pub async fn serve(config: ServiceConfig) -> crate::Result<()> {
    let listener = TcpListener::bind(config.addr).await?;
    info!(addr = %listener.local_addr()?, "translation service listening");
    serve_listener(listener, config).await
}

/// Serve requests from an already bound listener.
pub async fn serve_listener(listener: TcpListener, config: ServiceConfig) -> crate::Result<()> {
    axum::serve(listener, router(config)).await?;
    Ok(())
}

async fn compile(
    State(config): State<Arc<ServiceConfig>>,
    body: Result<String, StringRejection>,
) -> (StatusCode, Json<CompileResponse>) {
    match body {
        Ok(frame) => (StatusCode::OK, Json(respond(frame, &config).await)),
        Err(rejection) => {
            warn!(%rejection, "request body rejected");
            let response = CompileResponse::failure(format!(
                "request rejected: {}",
                rejection.body_text()
            ));
            (rejection.status(), Json(response))
        }
    }
}

/// Translate on the blocking pool so a slow request cannot stall the
/// runtime.
async fn respond(frame: String, config: &ServiceConfig) -> CompileResponse {
    debug!(bytes = frame.len(), "request received");
    let options = config.options.clone();
    let task = tokio::task::spawn_blocking(move || handle_frame(&frame, &options));

    let response = match tokio::time::timeout(config.timeout, task).await {
        Ok(Ok(response)) => response,
        Ok(Err(error)) => {
            warn!(%error, "translation task failed");
            CompileResponse::failure("internal error during translation")
        }
        Err(_) => {
            warn!(timeout = ?config.timeout, "translation timed out");
            CompileResponse::failure(format!(
                "translation timed out after {}s",
                config.timeout.as_secs_f64()
            ))
        }
    };

    if let Some(error) = &response.error {
        warn!(%error, "request rejected");
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(code: &str) -> CompileRequest {
        CompileRequest {
            code: code.to_string(),
        }
    }

    #[test]
    fn successful_translation() {
        let response = handle(&request("x = 5\n"));
        assert_eq!(response, CompileResponse::success("let x = 5;\n".to_string()));
    }

    #[test]
    fn pre_check_failures_skip_translation() {
        let response = handle(&request("import os\n"));
        assert_eq!(response.output_code, "");
        assert_eq!(
            response.error.as_deref(),
            Some("<input>:1:1: 'os' imported but unused")
        );
    }

    #[test]
    fn translation_failures_are_reported() {
        let response = handle(&request("x: int = 'a'\n"));
        assert!(!response.is_success());
        assert!(response.error.unwrap_or_default().contains("type mismatch"));
    }

    #[test]
    fn deeply_nested_source_is_answered() {
        let depth = 10_000;
        let code = format!("x = {}1{}\n", "(".repeat(depth), ")".repeat(depth));
        let response = handle(&request(&code));
        assert!(!response.is_success());
        assert!(response.error.unwrap_or_default().contains("too many nested"));
    }

    #[test]
    fn malformed_frames() {
        let options = TranslateOptions::default();
        for frame in ["not json", "{}", "{\"code\": 5}"] {
            let response = handle_frame(frame, &options);
            assert!(
                response.error.unwrap_or_default().starts_with("malformed request"),
                "{frame}"
            );
        }
    }

    #[test]
    fn response_frame_shape() {
        let json = serde_json::to_string(&CompileResponse::success("f();\n".to_string())).unwrap();
        assert_eq!(json, r#"{"output_code":"f();\n","error":null}"#);
    }
}
