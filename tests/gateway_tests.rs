//! End-to-end tests for `GET /api/pollen` against a fake upstream

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use hayfever::{AppState, Coordinate, ForecastSource, RawForecast, web};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

enum Reply {
    Forecast(RawForecast),
    NetworkError,
    Panic,
}

/// Fake upstream that records every call
struct FakeSource {
    reply: Reply,
    calls: Arc<AtomicUsize>,
    last_coordinate: Arc<Mutex<Option<Coordinate>>>,
}

#[async_trait]
impl ForecastSource for FakeSource {
    async fn fetch_forecast(&self, coordinate: Coordinate) -> anyhow::Result<RawForecast> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_coordinate.lock().unwrap() = Some(coordinate);
        match &self.reply {
            Reply::Forecast(forecast) => Ok(forecast.clone()),
            Reply::NetworkError => Err(anyhow::anyhow!("error sending request: connection refused")),
            Reply::Panic => panic!("upstream client exploded"),
        }
    }
}

struct Harness {
    app: Router,
    calls: Arc<AtomicUsize>,
    last_coordinate: Arc<Mutex<Option<Coordinate>>>,
}

fn harness(reply: Reply) -> Harness {
    let calls = Arc::new(AtomicUsize::new(0));
    let last_coordinate = Arc::new(Mutex::new(None));
    let source = FakeSource {
        reply,
        calls: calls.clone(),
        last_coordinate: last_coordinate.clone(),
    };
    Harness {
        app: web::app(AppState::new(source)),
        calls,
        last_coordinate,
    }
}

fn ok_body(body: Value) -> Reply {
    Reply::Forecast(RawForecast::new(200, body.to_string()))
}

fn grass_forecast(value: Value, category: &str) -> Value {
    json!({
        "regionCode": "au",
        "dailyInfo": [ {
            "date": { "year": 2024, "month": 10, "day": 1 },
            "pollenTypeInfo": [
                { "code": "TREE", "indexInfo": { "value": 1, "category": "Very Low" } },
                { "code": "GRASS", "indexInfo": {
                    "code": "UPI",
                    "value": value,
                    "category": category,
                    "indexDescription": "People with high allergy to pollen are likely to experience symptoms"
                } }
            ]
        } ]
    })
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// GET with an `Origin` header, returning the allow-origin header as well
async fn get_cross_origin(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::ORIGIN, "https://hayfever.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let allow_origin = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, allow_origin, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_missing_lat_is_bad_request() {
    let harness = harness(ok_body(json!({})));
    let (status, body) = get(harness.app, "/api/pollen?lng=115.86").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing or invalid lat/lng query params");
    assert_eq!(harness.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_non_numeric_lng_is_bad_request() {
    let harness = harness(ok_body(json!({})));
    let (status, body) = get(harness.app, "/api/pollen?lat=-31.95&lng=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(harness.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_no_query_is_bad_request() {
    let harness = harness(ok_body(json!({})));
    let (status, _) = get(harness.app, "/api/pollen").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(harness.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upstream_forbidden_is_passed_through() {
    let harness = harness(Reply::Forecast(RawForecast::new(403, "Forbidden")));
    let (status, body) = get(harness.app, "/api/pollen?lat=-31.95&lng=115.86").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Pollen API error");
    assert_eq!(body["status"], 403);
    assert!(body["bodyPreview"].as_str().unwrap().contains("Forbidden"));
    assert_eq!(harness.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_upstream_error_preview_is_truncated() {
    let long_body = "x".repeat(1000);
    let harness = harness(Reply::Forecast(RawForecast::new(500, long_body)));
    let (status, body) = get(harness.app, "/api/pollen?lat=1&lng=2").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["bodyPreview"].as_str().unwrap().len(), 300);
}

#[tokio::test]
async fn test_malformed_upstream_body() {
    let harness = harness(Reply::Forecast(RawForecast::new(200, "<html>not json</html>")));
    let (status, body) = get(harness.app, "/api/pollen?lat=-31.95&lng=115.86").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Invalid JSON from Pollen API");
    assert_eq!(body["bodyPreview"], "<html>not json</html>");
}

#[tokio::test]
async fn test_empty_daily_info_is_unknown() {
    let harness = harness(ok_body(json!({ "regionCode": "au", "dailyInfo": [] })));
    let (status, body) = get(harness.app, "/api/pollen?lat=-31.95&lng=115.86").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["level"], "unknown");
    assert_eq!(body["label"], "Pollen level unknown");
    assert_eq!(body["colour"], "#64748b");
    assert!(body["grassIndex"].is_null());
    assert!(body["indexValue"].is_null());
    assert_eq!(body["raw"]["regionCode"], "au");
}

#[tokio::test]
async fn test_grass_without_index_is_unknown() {
    let forecast = json!({
        "dailyInfo": [ { "pollenTypeInfo": [ { "code": "GRASS", "inSeason": false } ] } ]
    });
    let harness = harness(ok_body(forecast));
    let (status, body) = get(harness.app, "/api/pollen?lat=51.5&lng=-0.12").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["level"], "unknown");
}

#[tokio::test]
async fn test_moderate_grass_index() {
    let forecast = grass_forecast(json!(3), "Moderate");
    let harness = harness(ok_body(forecast.clone()));
    let (status, body) = get(harness.app, "/api/pollen?lat=-31.95&lng=115.86").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lat"], -31.95);
    assert_eq!(body["lng"], 115.86);
    assert_eq!(body["level"], "moderate");
    assert_eq!(body["label"], "Moderate pollen");
    assert_eq!(body["colour"], "#eab308");
    assert_eq!(body["indexValue"], json!(3));
    assert_eq!(body["category"], "Moderate");
    assert!(body["description"].as_str().unwrap().contains("high allergy"));
    assert_eq!(body["grassIndex"]["code"], "UPI");
    assert_eq!(body["raw"], forecast);

    assert_eq!(
        *harness.last_coordinate.lock().unwrap(),
        Some(Coordinate::new(-31.95, 115.86))
    );
}

#[tokio::test]
async fn test_each_band_over_http() {
    let cases = [
        (json!(0), "low", "#22c55e"),
        (json!(1), "low", "#22c55e"),
        (json!(2), "moderate", "#eab308"),
        (json!(4), "high", "#f97316"),
        (json!(5), "extreme", "#ef4444"),
        (json!(1.5), "extreme", "#ef4444"),
    ];

    for (value, level, colour) in cases {
        let harness = harness(ok_body(grass_forecast(value.clone(), "Any")));
        let (status, body) = get(harness.app, "/api/pollen?lat=0&lng=0").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["level"], level, "value {value}");
        assert_eq!(body["colour"], colour, "value {value}");
        assert_eq!(body["indexValue"], value);
    }
}

#[tokio::test]
async fn test_network_failure_is_server_error() {
    let harness = harness(Reply::NetworkError);
    let (status, body) = get(harness.app, "/api/pollen?lat=1&lng=2").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server error");
    assert!(body["details"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_panic_is_caught_as_server_error() {
    let harness = harness(Reply::Panic);
    let (status, body) = get(harness.app, "/api/pollen?lat=1&lng=2").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server error");
    assert!(body["details"].as_str().unwrap().contains("exploded"));
}

#[tokio::test]
async fn test_any_origin_is_allowed() {
    let harness = harness(ok_body(json!({ "dailyInfo": [] })));
    let (status, allow_origin, _) = get_cross_origin(harness.app, "/api/pollen?lat=1&lng=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(allow_origin.as_deref(), Some("*"));
}

#[tokio::test]
async fn test_bad_request_allows_any_origin() {
    let harness = harness(ok_body(json!({})));
    let (status, allow_origin, body) =
        get_cross_origin(harness.app, "/api/pollen?lat=1&lng=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(allow_origin.as_deref(), Some("*"));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_upstream_error_allows_any_origin() {
    let harness = harness(Reply::Forecast(RawForecast::new(403, "Forbidden")));
    let (status, allow_origin, body) =
        get_cross_origin(harness.app, "/api/pollen?lat=1&lng=2").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(allow_origin.as_deref(), Some("*"));
    assert_eq!(body["error"], "Pollen API error");
}

#[tokio::test]
async fn test_panic_response_allows_any_origin() {
    let harness = harness(Reply::Panic);
    let (status, allow_origin, body) =
        get_cross_origin(harness.app, "/api/pollen?lat=1&lng=2").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(allow_origin.as_deref(), Some("*"));
    assert_eq!(body["error"], "Server error");
}
