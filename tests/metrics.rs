// tests/metrics.rs
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use word_scorer::{build_app, ServiceConfig};

// Full in-process app with built-in defaults, so repo config/ and env don't matter.
fn build() -> Router {
    build_app(&ServiceConfig::default()).expect("build_app with defaults")
}

async fn scrape(app: Router) -> String {
    let resp = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn app_can_be_built_more_than_once() {
    // Recorder install is once-per-process; a second build must reuse it.
    let _a = build();
    let _b = build();
}

#[tokio::test]
async fn scoring_requests_show_up_in_exposition() {
    let app = build();

    let ok = app
        .clone()
        .oneshot(
            Request::post("/api/score")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"documentText":"one two three"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);

    let bad = app
        .clone()
        .oneshot(
            Request::post("/api/score")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let text = scrape(app).await;
    for needle in [
        "score_requests_total",
        "outcome=\"ok\"",
        "outcome=\"bad_request\"",
        "score_document_words",
        "scorer_threshold_words 50",
    ] {
        assert!(
            text.contains(needle),
            "metrics exposition missing '{needle}'\n{text}"
        );
    }
}

#[serial_test::serial]
#[tokio::test]
async fn app_builds_from_repo_config() {
    std::env::remove_var("SCORER_CONFIG_PATH");
    let app = word_scorer::app().expect("app() should build from config/scorer.toml");
    let resp = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
