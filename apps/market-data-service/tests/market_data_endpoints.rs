//! Market Data Endpoint Integration Tests
//!
//! Drives the full router with a static provider and recording doubles.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use market_data_service::{
    AppState, MarketDataService, MetricsPort, MetricsRegistry, ProviderError, RecordingLogger,
    RecordingSpanFactory, StaticDataProvider, create_router,
};

struct TestApp {
    router: Router,
    provider: StaticDataProvider,
    metrics: Arc<MetricsRegistry>,
    spans: RecordingSpanFactory,
    logger: RecordingLogger,
}

fn setup() -> TestApp {
    let provider = StaticDataProvider::new();
    let metrics = Arc::new(MetricsRegistry::new().unwrap());
    let spans = RecordingSpanFactory::new();
    let logger = RecordingLogger::new();

    let service = MarketDataService::new(
        Arc::new(provider.clone()),
        Arc::clone(&metrics) as Arc<dyn MetricsPort>,
        Arc::new(spans.clone()),
        Arc::new(logger.clone()),
    );

    TestApp {
        router: create_router(AppState::new(Arc::new(service), Arc::clone(&metrics))),
        provider,
        metrics,
        spans,
        logger,
    }
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn latest_price_success() {
    let app = setup();
    app.provider
        .set_latest("ACME", Decimal::new(15025, 2), 1_000_000);

    let before = Utc::now();
    let (status, body) = get_json(&app.router, "/market-data/ACME").await;
    let after = Utc::now();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "ACME");
    assert_eq!(body["price"], 150.25);
    assert_eq!(body["volume"], 1_000_000);

    let timestamp: DateTime<Utc> = body["timestamp"].as_str().unwrap().parse().unwrap();
    assert!(before <= timestamp && timestamp <= after);
}

#[tokio::test]
async fn latest_price_unknown_symbol_is_404() {
    let app = setup();

    let (status, body) = get_json(&app.router, "/market-data/ZZZZ").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        serde_json::json!({"detail": "No data found for symbol ZZZZ"})
    );
    assert!(app.spans.spans()[0].exceptions.is_empty());
}

#[tokio::test]
async fn history_connection_error_is_500_with_one_exception() {
    let app = setup();
    app.provider.fail_with(
        "ACME",
        ProviderError::Transport("Connection aborted: remote end closed".to_string()),
    );

    let (status, body) = get_json(&app.router, "/historical-data/ACME?days=7").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        serde_json::json!({"detail": "Connection aborted: remote end closed"})
    );

    let spans = app.spans.spans();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].exceptions.len(), 1);
    assert_eq!(spans[0].end_count, 1);
}

#[tokio::test]
async fn history_unknown_symbol_is_404() {
    let app = setup();

    let (status, body) = get_json(&app.router, "/historical-data/ZZZZ?days=5").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "No historical data found for symbol ZZZZ");
}

#[tokio::test]
async fn history_returns_records_in_date_order() {
    let app = setup();
    app.provider
        .set_history("ACME", StaticDataProvider::daily_bars(10, Decimal::from(20)));

    let (status, body) = get_json(&app.router, "/historical-data/ACME?days=10").await;

    assert_eq!(status, StatusCode::OK);
    let records = body["data"].as_array().unwrap();
    assert_eq!(records.len(), 10);

    let dates: Vec<&str> = records
        .iter()
        .map(|r| r["date"].as_str().unwrap())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort_unstable();
    assert_eq!(dates, sorted);

    assert_eq!(records[0]["open"], 20.0);
    assert_eq!(records[0]["close"], 20.5);
    assert_eq!(records[0]["volume"], 1000);
}

#[tokio::test]
async fn health_has_no_side_effects() {
    let app = setup();
    let metrics_before = app.metrics.export_text();

    let (status, body) = get_json(&app.router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"status": "healthy"}));
    assert!(app.spans.spans().is_empty());
    assert!(app.logger.records().is_empty());
    assert_eq!(app.metrics.export_text(), metrics_before);
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn metrics_endpoint_reflects_requests() {
    let app = setup();
    app.provider.set_latest("ACME", Decimal::new(4210, 1), 10);

    let _ = get_json(&app.router, "/market-data/ACME").await;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains(r#"stock_price{symbol="ACME"} 421"#));
    assert!(text.contains("market_data_request_total{"));
    assert!(text.contains("market_data_scrape_duration_seconds_bucket{"));
}
