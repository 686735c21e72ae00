//! Word Scorer — Binary Entrypoint
//! Boots the Axum HTTP server on the configured address.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use word_scorer::{build_app, ServiceConfig, DEFAULT_LOG_FILTER};

/// Compact logs by default; `LOG_FORMAT=json` switches to JSON lines.
/// Filter comes from `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = ServiceConfig::load_default()?;
    // Invalid scorer bounds stop the process here.
    let app = build_app(&cfg).context("failed to initialize scorer")?;

    let listener = tokio::net::TcpListener::bind(&cfg.server.addr)
        .await
        .with_context(|| format!("binding {}", cfg.server.addr))?;
    info!(addr = %cfg.server.addr, "starting server, API available at /api/score");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
