//! HTTP analysis service.
//!
//! `POST /analyze` takes `{"urls": [[url, brandName], ...]}` and returns one
//! comparison row per pair. Each request runs on its own rendering session;
//! the number of concurrent sessions is bounded.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::batch::{analyze_batch, BatchEntry};
use crate::error::Result;
use crate::render::Renderer;
use crate::url_utils;

/// Creates a fresh rendering session for one request.
///
/// Called on a blocking thread; the session is dropped when the request's
/// batch finishes or fails.
pub type RendererFactory = Arc<dyn Fn() -> Result<Box<dyn Renderer>> + Send + Sync>;

/// Response body of `GET /`.
pub const INDEX_MESSAGE: &str = "Server is running. Use POST /analyze to analyze URLs.";

const INVALID_FORMAT: &str = "Invalid input format. Expected an object with a 'urls' array.";
const INVALID_TYPES: &str = "Invalid data types. Both URL and brand name should be strings.";
const EMPTY_BATCH: &str = "At least one URL pair is required.";

/// Shared service state.
#[derive(Clone)]
pub struct ServerState {
    factory: RendererFactory,
    sessions: Arc<Semaphore>,
}

impl ServerState {
    /// State using `factory` for sessions, at most `max_sessions` at a time.
    pub fn new(factory: RendererFactory, max_sessions: usize) -> Self {
        Self {
            factory,
            sessions: Arc::new(Semaphore::new(max_sessions.max(1))),
        }
    }

    /// State launching a headless Chrome session per request.
    ///
    /// Sessions use [`crate::SERVICE_USER_AGENT`] unless `options` sets a
    /// user agent.
    #[cfg(feature = "chrome")]
    #[must_use]
    pub fn chrome(options: crate::Options) -> Self {
        let options = options.for_service();
        let max_sessions = options.max_sessions;
        let factory: RendererFactory = Arc::new(move || {
            crate::render::ChromeRenderer::launch(&options)
                .map(|renderer| Box::new(renderer) as Box<dyn Renderer>)
        });
        Self::new(factory, max_sessions)
    }
}

/// Error returned to the client as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: StatusCode,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Build the service router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze))
        .with_state(state)
}

/// Bind `addr` and serve until the process stops.
pub async fn serve(addr: SocketAddr, state: ServerState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Server running at http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}

async fn index() -> &'static str {
    INDEX_MESSAGE
}

async fn analyze(
    State(state): State<ServerState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Response {
    let entries = match payload {
        Ok(Json(value)) => match parse_payload(&value) {
            Ok(entries) => entries,
            Err(err) => return err.into_response(),
        },
        Err(rejection) => {
            info!(%rejection, "rejected analyze payload");
            return ApiError::bad_request(INVALID_FORMAT).into_response();
        }
    };

    match run_batch(&state, entries).await {
        Ok(results) => Json(results).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Validate an analyze payload into batch entries.
///
/// Pairs are checked in order; the first offending pair determines the
/// error. Elements beyond the first two of a pair are ignored.
pub fn parse_payload(payload: &Value) -> std::result::Result<Vec<BatchEntry>, ApiError> {
    let pairs = payload
        .get("urls")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::bad_request(INVALID_FORMAT))?;

    let mut entries = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let (url, brand_name) = match pair.as_array().map(Vec::as_slice) {
            Some([Value::String(url), Value::String(brand), ..]) => (url, brand),
            _ => return Err(ApiError::bad_request(INVALID_TYPES)),
        };
        if !url_utils::is_valid_url(url) {
            return Err(ApiError::bad_request(format!("Invalid URL: {url}")));
        }
        entries.push(BatchEntry::new(url.as_str(), brand_name.as_str()));
    }

    if entries.is_empty() {
        return Err(ApiError::bad_request(EMPTY_BATCH));
    }
    Ok(entries)
}

async fn run_batch(
    state: &ServerState,
    entries: Vec<BatchEntry>,
) -> std::result::Result<Vec<crate::ComparisonResult>, ApiError> {
    let permit = state
        .sessions
        .clone()
        .acquire_owned()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let factory = Arc::clone(&state.factory);

    // Rendering blocks for the whole batch.
    let outcome = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        let mut renderer = factory()?;
        analyze_batch(&mut renderer, &entries)
    })
    .await;

    match outcome {
        Ok(Ok(results)) => Ok(results),
        Ok(Err(err)) => {
            error!(error = %err, "analysis failed");
            Err(ApiError::internal(err.to_string()))
        }
        Err(join_err) => {
            error!(error = %join_err, "analysis task panicked");
            Err(ApiError::internal(join_err.to_string()))
        }
    }
}
