use anyhow::Context;
use axum::{routing::get, Router};
use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub const REQUESTS_TOTAL: &str = "score_requests_total";
pub const DOCUMENT_WORDS: &str = "score_document_words";
pub const THRESHOLD_GAUGE: &str = "scorer_threshold_words";

// The global recorder can only be installed once per process.
static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (first call only) and publish the
    /// configured threshold as a static gauge.
    pub fn init(threshold_words: i64) -> anyhow::Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                PrometheusBuilder::new()
                    .install_recorder()
                    .context("prometheus: install recorder")
            })?
            .clone();

        gauge!(THRESHOLD_GAUGE).set(threshold_words as f64);

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
