use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::extract::ApiQuery;
use super::AppState;
use crate::classify::{annotate, summarize, SeriesSummary};
use crate::models::AnnotatedPoint;
use crate::presets::MetricPreset;
use crate::synth::{generate_series, random_alert, realtime_metric, DemoAlert};
use crate::InsightError;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/metrics/realtime", get(realtime_handler))
        .route("/api/metrics/{preset}", get(preset_handler))
        .route("/api/alerts/random", get(alert_handler))
}

/// A preset chart: annotated points plus its badge summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PresetChart {
    preset: MetricPreset,
    unit: &'static str,
    threshold: f64,
    points: Vec<AnnotatedPoint>,
    summary: SeriesSummary,
}

async fn preset_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<PresetChart>, InsightError> {
    // ---
    let preset: MetricPreset = name.parse()?;
    let chart = preset.chart();

    let series = generate_series(&mut state.rng(), Local::now().date_naive(), chart.params);
    let points = annotate(&series, chart.threshold)?;
    let summary = summarize(&points);

    info!(
        "GET /api/metrics/{} - {} points, {} flagged",
        preset.as_str(),
        summary.points,
        summary.flagged
    );

    Ok(Json(PresetChart {
        preset,
        unit: chart.unit,
        threshold: chart.threshold,
        points,
        summary,
    }))
}

#[derive(Debug, Deserialize)]
struct RealtimeQuery {
    base: f64,
    range: Option<f64>,
}

#[derive(Debug, Serialize)]
struct RealtimeReading {
    value: f64,
}

async fn realtime_handler(
    ApiQuery(query): ApiQuery<RealtimeQuery>,
    State(state): State<AppState>,
) -> Result<Json<RealtimeReading>, InsightError> {
    // ---
    let range = query.range.unwrap_or(10.0);
    if !query.base.is_finite() || !range.is_finite() || range < 0.0 {
        return Err(InsightError::InvalidInput(
            "base and range must be finite, range non-negative".to_string(),
        ));
    }

    let value = realtime_metric(&mut state.rng(), query.base, range);
    debug!("GET /api/metrics/realtime - {}", value);
    Ok(Json(RealtimeReading { value }))
}

async fn alert_handler(State(state): State<AppState>) -> Json<DemoAlert> {
    // ---
    Json(random_alert(&mut state.rng(), Utc::now()))
}
