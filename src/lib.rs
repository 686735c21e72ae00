// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod metrics;
pub mod scorer;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::ServiceConfig;
pub use crate::scorer::{ScoreResult, ScorerConfig, ScorerError, WordScorer};

use axum::Router;
use tracing::info;

/// Log filter used when `RUST_LOG` is unset. Request spans from the HTTP
/// trace layer are emitted at INFO, so they show up under it.
pub const DEFAULT_LOG_FILTER: &str = "word_scorer=info,tower_http=info";

/// Build the full application Router: scoring API, health probe and `/metrics`.
///
/// The scorer always runs with the fixed `ScorerConfig::default()` bounds;
/// `cfg` only carries server settings.
pub fn build_app(cfg: &ServiceConfig) -> anyhow::Result<Router> {
    let scorer = WordScorer::new(ScorerConfig::default())?;
    let c = scorer.config();
    info!(
        min_score = c.min_score,
        max_score = c.max_score,
        threshold = c.threshold,
        addr = %cfg.server.addr,
        "scorer initialized"
    );

    let metrics = metrics::Metrics::init(c.threshold)?;
    Ok(router(AppState::new(scorer)).merge(metrics.router()))
}

/// Same Router the binary serves, using `ServiceConfig::load_default()`.
pub fn app() -> anyhow::Result<Router> {
    let cfg = ServiceConfig::load_default()?;
    build_app(&cfg)
}
