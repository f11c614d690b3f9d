//! HTTP server and API handlers for the dashboard.
//!
//! GET /api/statistics - per-column descriptive statistics.
//! GET /api/charts - every chart as a JSON-encoded figure document.
//! GET /api/chart/:id - one chart as a figure object.
//! GET /api/summary - headline numbers.
//! GET /health - liveness and whether a dataset is loaded.

use crate::charts::ChartRegistry;
use crate::config::ServerConfig;
use crate::dataset::Table;
use crate::error::ComputeError;
use crate::stats::{self, Statistics};
use crate::summary::{self, Summary};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;

/// Application state shared across handlers.
pub struct AppState {
    /// `None` when the dataset failed to load.
    pub table: Option<Arc<Table>>,
    pub charts: ChartRegistry,
}

impl AppState {
    pub fn new(table: Option<Table>) -> Self {
        Self {
            table: table.map(Arc::new),
            charts: ChartRegistry::new(),
        }
    }

    fn table(&self) -> Result<&Table, ApiError> {
        self.table.as_deref().ok_or(ApiError::DataUnavailable)
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/statistics", get(statistics_handler))
        .route("/api/charts", get(charts_handler))
        .route("/api/chart/:id", get(chart_handler))
        .route("/api/summary", get(summary_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server and serve until Ctrl+C.
pub async fn run_server(table: Option<Table>, config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(table));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "Dashboard API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

// --- Errors ---

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Failures surfaced to API clients as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Data not available")]
    DataUnavailable,

    #[error("No charts available")]
    NoCharts,

    #[error("Unknown chart: {0}")]
    UnknownChart(String),

    #[error("{0}")]
    Compute(#[from] ComputeError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownChart(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    data_loaded: bool,
}

/// GET /health
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        data_loaded: state.table.is_some(),
    })
}

/// GET /api/statistics - empty mapping when no dataset is loaded.
async fn statistics_handler(State(state): State<Arc<AppState>>) -> Result<Json<Statistics>, ApiError> {
    let Some(table) = state.table.as_deref() else {
        return Ok(Json(Statistics::new()));
    };
    match stats::compute_statistics(table) {
        Ok(statistics) => Ok(Json(statistics)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to compute statistics");
            Err(e.into())
        }
    }
}

/// GET /api/charts
async fn charts_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IndexMap<&'static str, String>>, ApiError> {
    let table = state.table().map_err(|_| ApiError::NoCharts)?;
    let charts = state.charts.build_all(table).map_err(|e| {
        tracing::error!(chart = e.chart, error = %e.source, "Failed to build charts");
        ApiError::NoCharts
    })?;

    Ok(Json(
        charts
            .into_iter()
            .map(|(id, figure)| (id, figure.to_document()))
            .collect(),
    ))
}

/// GET /api/chart/:id - placeholder figure when the chart cannot be built.
async fn chart_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let chart = state
        .charts
        .get(&id)
        .ok_or_else(|| ApiError::UnknownChart(id.clone()))?;

    let figure = match state.table.as_deref() {
        Some(table) => chart.build(table).unwrap_or_else(|e| {
            tracing::error!(chart = chart.id(), error = %e, "Failed to build chart");
            chart.placeholder()
        }),
        None => chart.placeholder(),
    };
    Ok(Json(figure.to_json()))
}

/// GET /api/summary
async fn summary_handler(State(state): State<Arc<AppState>>) -> Result<Json<Summary>, ApiError> {
    let table = state.table()?;
    summary::summarize(table).map(Json).map_err(|e| {
        tracing::error!(error = %e, "Failed to compute summary");
        e.into()
    })
}
