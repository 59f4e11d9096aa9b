use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use tracing::{debug, info};

use super::extract::{ApiJson, ApiQuery};
use super::AppState;
use crate::classify::annotate;
use crate::models::{AnnotatedPoint, TimeSeriesPoint};
use crate::synth::{generate_series, SeriesParams};
use crate::InsightError;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/series", get(generate_handler))
        .route("/api/series/annotate", post(annotate_handler))
}

/// Query parameters for series generation; omitted fields use the defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeriesQuery {
    days: Option<u32>,
    base_value: Option<f64>,
    variance: Option<f64>,
}

impl SeriesQuery {
    // ---
    fn into_params(self, max_days: u32) -> Result<SeriesParams, InsightError> {
        // ---
        let defaults = SeriesParams::default();
        let params = SeriesParams {
            days: self.days.unwrap_or(defaults.days),
            base_value: self.base_value.unwrap_or(defaults.base_value),
            variance: self.variance.unwrap_or(defaults.variance),
        };

        if params.days > max_days {
            return Err(InsightError::InvalidInput(format!(
                "days must be at most {max_days}, got {}",
                params.days
            )));
        }
        if !params.base_value.is_finite() {
            return Err(InsightError::InvalidInput(
                "baseValue must be finite".to_string(),
            ));
        }
        if !params.variance.is_finite() || params.variance < 0.0 {
            return Err(InsightError::InvalidInput(
                "variance must be a non-negative number".to_string(),
            ));
        }
        Ok(params)
    }
}

async fn generate_handler(
    ApiQuery(query): ApiQuery<SeriesQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<TimeSeriesPoint>>, InsightError> {
    // ---
    debug!("GET /api/series - {:?}", query);

    let params = query.into_params(state.config.series_max_days)?;
    let series = generate_series(&mut state.rng(), Local::now().date_naive(), params);

    info!("Generated series of {} points", series.len());
    Ok(Json(series))
}

#[derive(Debug, Deserialize)]
struct AnnotateRequest {
    series: Vec<TimeSeriesPoint>,
    threshold: f64,
}

async fn annotate_handler(
    ApiJson(request): ApiJson<AnnotateRequest>,
) -> Result<Json<Vec<AnnotatedPoint>>, InsightError> {
    // ---
    debug!(
        "POST /api/series/annotate - {} points, threshold {}",
        request.series.len(),
        request.threshold
    );

    let annotated = annotate(&request.series, request.threshold)?;
    Ok(Json(annotated))
}
