use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use metrics::{counter, histogram};
use thiserror::Error;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, error, Level};

use crate::metrics::{DOCUMENT_WORDS, REQUESTS_TOTAL};
use crate::scorer::WordScorer;

pub const SUCCESS_MESSAGE: &str = "Scoring successful";

/// Shared state handed to every handler.
///
/// `scorer` is optional so a router without a scorer is representable; such a
/// router answers `/api/score` with 500 instead of panicking.
#[derive(Clone, Default)]
pub struct AppState {
    scorer: Option<Arc<WordScorer>>,
}

impl AppState {
    pub fn new(scorer: WordScorer) -> Self {
        Self {
            scorer: Some(Arc::new(scorer)),
        }
    }

    pub fn unconfigured() -> Self {
        Self { scorer: None }
    }
}

pub fn router(state: AppState) -> Router {
    let api = Router::new().route("/score", post(post_score));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api", api)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub document_text: String,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub word_count: usize,
    pub score: i64,
    pub message: String,
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Request-level failures, rendered as `{"message": ...}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn outcome(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        counter!(REQUESTS_TOTAL, "outcome" => self.outcome()).increment(1);
        let body = ErrorBody {
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rej: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rej.body_text()))
    }
}

async fn post_score(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let Json(body) = payload?;

    // An empty string counts as a missing field.
    if body.document_text.is_empty() {
        return Err(ApiError::BadRequest(
            "Invalid request body: documentText is required".to_string(),
        ));
    }

    let Some(scorer) = state.scorer.as_ref() else {
        error!("scorer not initialized in handler state");
        return Err(ApiError::Internal(
            "Server configuration error: scorer not available.".to_string(),
        ));
    };

    let result = scorer.evaluate(&body.document_text);

    // Never log raw text. Only hashed id + derived numbers.
    let id = anon_hash(&body.document_text);
    debug!(%id, word_count = result.word_count, score = result.score, "document scored");
    counter!(REQUESTS_TOTAL, "outcome" => "ok").increment(1);
    histogram!(DOCUMENT_WORDS).record(result.word_count as f64);

    Ok(Json(ScoreResponse {
        word_count: result.word_count,
        score: result.score,
        message: SUCCESS_MESSAGE.to_string(),
    }))
}

/// Short, stable id for a document: first 6 bytes of its SHA-256, hex encoded.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
