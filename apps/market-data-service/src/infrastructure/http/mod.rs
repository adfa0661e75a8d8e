//! HTTP Surface
//!
//! Axum router for the market data endpoints.
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness check, no instrumentation
//! - `GET /metrics` - Prometheus metrics in text format
//! - `GET /market-data/{symbol}` - Latest price and volume
//! - `GET /historical-data/{symbol}?days=N` - Daily OHLCV history (default 30 days)
//!
//! Non-2xx responses always carry `{"detail": "..."}`, including unknown
//! routes (404) and unsupported methods on known routes (405).

mod response;
mod server;

pub use response::{ErrorResponse, HealthResponse};
pub use server::{HttpServer, HttpServerError};

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::application::services::MarketDataService;
use crate::infrastructure::metrics::{MetricsRegistry, PROMETHEUS_CONTENT_TYPE};

/// History window used when `days` is not given.
pub const DEFAULT_HISTORY_DAYS: i64 = 30;

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    service: Arc<MarketDataService>,
    metrics: Arc<MetricsRegistry>,
}

impl AppState {
    /// Create handler state around the request pipeline and the registry
    /// it records into.
    #[must_use]
    pub const fn new(service: Arc<MarketDataService>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { service, metrics }
    }
}

/// Query parameters for the history endpoint.
#[derive(Debug, Deserialize)]
struct HistoryParams {
    #[serde(default = "default_days")]
    days: i64,
}

const fn default_days() -> i64 {
    DEFAULT_HISTORY_DAYS
}

/// Build the service router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/market-data/{symbol}", get(market_data_handler))
        .route("/historical-data/{symbol}", get(historical_data_handler))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(state)
}

// =============================================================================
// HTTP Handlers
// =============================================================================

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.metrics.export_text(),
    )
}

async fn market_data_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Response {
    state.service.get_current_price(&symbol).await.into_response()
}

async fn historical_data_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> Response {
    let days = match params {
        Ok(Query(params)) => params.days,
        Err(rejection) => {
            return ErrorResponse::with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                rejection.body_text(),
            );
        }
    };

    state.service.get_history(&symbol, days).await.into_response()
}

async fn not_found_handler() -> Response {
    ErrorResponse::with_status(StatusCode::NOT_FOUND, "Not Found")
}

async fn method_not_allowed_handler() -> Response {
    ErrorResponse::with_status(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::logging::RecordingLogger;
    use crate::infrastructure::provider::StaticDataProvider;
    use crate::infrastructure::telemetry::RecordingSpanFactory;

    fn router(provider: &StaticDataProvider) -> Router {
        let metrics = Arc::new(MetricsRegistry::new().unwrap());
        let service = MarketDataService::new(
            Arc::new(provider.clone()),
            Arc::clone(&metrics) as Arc<dyn crate::application::ports::MetricsPort>,
            Arc::new(RecordingSpanFactory::new()),
            Arc::new(RecordingLogger::new()),
        );
        create_router(AppState::new(Arc::new(service), metrics))
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = get(router(&StaticDataProvider::new()), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"healthy"}"#);
    }

    #[tokio::test]
    async fn metrics_has_prometheus_content_type() {
        let response = router(&StaticDataProvider::new())
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            PROMETHEUS_CONTENT_TYPE
        );
    }

    #[tokio::test]
    async fn history_defaults_to_thirty_days() {
        let provider = StaticDataProvider::new();
        provider.set_history("ACME", StaticDataProvider::daily_bars(30, Decimal::from(50)));

        let (status, body) = get(router(&provider), "/historical-data/ACME").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["symbol"], "ACME");
        assert_eq!(json["data"].as_array().unwrap().len(), 30);
    }

    #[tokio::test]
    async fn non_integer_days_is_unprocessable() {
        let (status, body) =
            get(router(&StaticDataProvider::new()), "/historical-data/ACME?days=week").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let error: ErrorResponse = serde_json::from_str(&body).unwrap();
        assert!(!error.detail.is_empty());
    }

    #[tokio::test]
    async fn unknown_route_keeps_detail_contract() {
        let (status, body) = get(router(&StaticDataProvider::new()), "/market-data/").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"detail":"Not Found"}"#);
    }

    #[tokio::test]
    async fn wrong_method_on_known_route_keeps_detail_contract() {
        let provider = StaticDataProvider::new();
        for uri in ["/health", "/market-data/ACME"] {
            let response = router(&provider)
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(&body[..], br#"{"detail":"Method Not Allowed"}"#);
        }
        assert_eq!(provider.call_count(), 0);
    }
}
