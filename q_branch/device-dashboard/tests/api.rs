//! End-to-end tests of the HTTP API against an in-memory CSV dataset.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use device_dashboard::dataset::load_from_reader;
use device_dashboard::server::{router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const HEADER: &str = "device_type,brand,model,release_year,os,form_factor,cpu_brand,cpu_model,\
cpu_tier,cpu_cores,cpu_threads,cpu_base_ghz,cpu_boost_ghz,gpu_brand,gpu_model,gpu_tier,vram_gb,\
ram_gb,storage_type,storage_gb,storage_drive_count,display_type,display_size_in,resolution,\
refresh_hz,battery_wh,charger_watts,psu_watts,wifi,bluetooth,weight_kg,warranty_months,price";

/// Twelve laptops and desktops across two brands and two release years.
fn csv_fixture() -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for i in 0..12u32 {
        let (device, brand, os) = if i % 3 == 0 {
            ("Desktop", "Dell", "Windows")
        } else {
            ("Laptop", "Apple", "macOS")
        };
        let year = if i < 10 { 2023 } else { 2024 };
        let price = 800 + 100 * i;
        csv.push_str(&format!(
            "{device},{brand},M{i},{year},{os},Standard,Intel,i{i},{tier},{cores},{threads},2.4,4.{i},\
NVIDIA,RTX,{tier},{vram},{ram},SSD,512,1,IPS,15.6,1920x1080,60,70,90,,Wi-Fi 6,5.1,1.8,12,{price}\n",
            tier = 1 + i % 5,
            cores = 4 + i % 4,
            threads = 8 + 2 * (i % 4),
            vram = 2 * (i % 3),
            ram = 8 * (1 + i % 2),
        ));
    }
    csv
}

fn app(loaded: bool) -> Router {
    let table = loaded.then(|| load_from_reader(csv_fixture().as_bytes()).unwrap());
    router(Arc::new(AppState::new(table)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_reports_data_loaded() {
    let (status, body) = get(app(true), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "data_loaded": true}));

    let (status, body) = get(app(false), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data_loaded"], false);
}

#[tokio::test]
async fn test_statistics() {
    let (status, body) = get(app(true), "/api/statistics").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["brand"]["type"], "categorical");
    assert_eq!(body["brand"]["describe"]["top"], "Apple");
    assert_eq!(body["brand"]["value_counts"], json!({"Apple": 8, "Dell": 4}));
    assert_eq!(body["price"]["type"], "numerical");
    assert_eq!(body["price"]["describe"]["count"], 12);
    assert_eq!(body["price"]["quartiles"]["Q2"], body["price"]["describe"]["50%"]);
    assert!(body.get("performance_score").is_some());
    assert!(body.get("battery_wh").is_none(), "dropped columns are not described");
}

#[tokio::test]
async fn test_statistics_without_data_is_empty() {
    let (status, body) = get(app(false), "/api/statistics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_charts_are_encoded_documents() {
    let (status, body) = get(app(true), "/api/charts").await;
    assert_eq!(status, StatusCode::OK);

    let charts = body.as_object().unwrap();
    assert_eq!(charts.len(), 9);
    assert_eq!(charts.keys().next().map(String::as_str), Some("scatter_price_performance"));
    for (id, document) in charts {
        let figure: Value = serde_json::from_str(document.as_str().unwrap()).unwrap();
        assert!(figure["data"].is_array(), "{} should have data", id);
        assert!(figure["layout"].is_object(), "{} should have a layout", id);
    }

    let trend: Value = serde_json::from_str(charts["line_price_trend"].as_str().unwrap()).unwrap();
    assert_eq!(trend["data"][0]["x"], json!([2023]), "2024 has only two devices");
}

#[tokio::test]
async fn test_charts_without_data() {
    let (status, body) = get(app(false), "/api/charts").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "No charts available"}));
}

#[tokio::test]
async fn test_single_chart() {
    let (status, body) = get(app(true), "/api/chart/pie_device_type").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["type"], "pie");
    assert_eq!(body["data"][0]["labels"], json!(["Laptop", "Desktop"]));
    assert_eq!(body["data"][0]["values"], json!([8, 4]));
}

#[tokio::test]
async fn test_single_chart_placeholder_without_data() {
    let (status, body) = get(app(false), "/api/chart/hist_price").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["layout"]["annotations"][0]["text"], "No data available");
    assert_eq!(body["layout"]["title"]["text"], "Price Distribution");
}

#[tokio::test]
async fn test_unknown_chart() {
    let (status, body) = get(app(true), "/api/chart/radar").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Unknown chart: radar"}));
}

#[tokio::test]
async fn test_summary() {
    let (status, body) = get(app(true), "/api/summary").await;
    assert_eq!(status, StatusCode::OK);

    // prices 800..=1900 step 100
    assert_eq!(body["total_devices"], 12);
    assert_eq!(body["avg_price"], 1350.0);
    assert_eq!(body["median_price"], 1350.0);
    assert_eq!(body["min_price"], 800.0);
    assert_eq!(body["max_price"], 1900.0);
    assert_eq!(body["total_brands"], 2);
    assert_eq!(body["total_models"], 12);
    assert_eq!(body["device_types"], json!({"Laptop": 8, "Desktop": 4}));
    assert_eq!(body["operating_systems"], json!({"macOS": 8, "Windows": 4}));
}

#[tokio::test]
async fn test_summary_without_data() {
    let (status, body) = get(app(false), "/api/summary").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Data not available"}));
}
