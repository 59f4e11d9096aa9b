//! Insight classifier.
//!
//! Annotates a series with its mean, population standard deviation derived
//! anomaly flags, threshold breaches, point-to-point trend and percentage
//! deviation. Anomaly status outranks threshold status: a point that is both
//! anomalous and above threshold is a `Warning`, never an `Alert`.

use serde::Serialize;
use tracing::debug;

use crate::error::InsightError;
use crate::models::{AnnotatedPoint, Deviation, PointStatus, TimeSeriesPoint};

// ---

/// Points further than this many standard deviations from the mean are anomalies.
pub const ANOMALY_SIGMA: f64 = 1.5;

/// Annotate every point of `series` against its own statistics and `threshold`.
///
/// Returns [`InsightError::EmptySeries`] for an empty series, since neither
/// mean nor deviation exist, and [`InsightError::InvalidInput`] for a series
/// that fails [`validate_series`]. A zero average yields
/// [`Deviation::Undefined`] on every point. Output timestamps are rebuilt
/// from each point's date.
pub fn annotate(
    series: &[TimeSeriesPoint],
    threshold: f64,
) -> Result<Vec<AnnotatedPoint>, InsightError> {
    // ---
    validate_series(series)?;
    if !threshold.is_finite() {
        return Err(InsightError::InvalidInput(format!(
            "threshold must be finite, got {threshold}"
        )));
    }

    let n = series.len() as f64;
    let average = series.iter().map(|p| p.value).sum::<f64>() / n;
    let std_dev = (series
        .iter()
        .map(|p| (p.value - average).powi(2))
        .sum::<f64>()
        / n)
        .sqrt();

    debug!(
        points = series.len(),
        average, std_dev, threshold, "annotating series"
    );

    let annotated = series
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let is_anomaly = (point.value - average).abs() > std_dev * ANOMALY_SIGMA;
            let is_high = point.value > threshold;
            let status = if is_anomaly {
                PointStatus::Warning
            } else if is_high {
                PointStatus::Alert
            } else {
                PointStatus::Normal
            };
            let trend = match idx {
                0 => 0.0,
                _ => point.value - series[idx - 1].value,
            };
            let deviation = if average == 0.0 {
                Deviation::Undefined
            } else {
                Deviation::from_percent((point.value - average) / average * 100.0)
            };

            AnnotatedPoint {
                point: TimeSeriesPoint::new(point.date, point.value),
                average,
                threshold,
                is_anomaly,
                is_high,
                status,
                trend,
                deviation,
            }
        })
        .collect();

    Ok(annotated)
}

/// Check that `series` is non-empty, has finite non-negative values and
/// strictly ascending (hence unique) dates.
pub fn validate_series(series: &[TimeSeriesPoint]) -> Result<(), InsightError> {
    // ---
    if series.is_empty() {
        return Err(InsightError::EmptySeries);
    }
    if let Some(bad) = series
        .iter()
        .find(|p| !p.value.is_finite() || p.value < 0.0)
    {
        return Err(InsightError::InvalidInput(format!(
            "value on {} must be finite and non-negative, got {}",
            bad.date, bad.value
        )));
    }
    if let Some(w) = series.windows(2).find(|w| w[0].date >= w[1].date) {
        return Err(InsightError::InvalidInput(format!(
            "dates must be strictly ascending: {} is followed by {}",
            w[0].date, w[1].date
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

/// Chart badge data derived from an annotated series.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    // ---
    pub points: usize,
    /// Points that are anomalous or above threshold.
    pub flagged: usize,
    pub anomalies: usize,
    pub breaches: usize,
    pub latest_value: Option<f64>,
    pub latest_trend: Option<f64>,
    /// `Increasing` only when the last trend is strictly positive.
    pub direction: TrendDirection,
}

pub fn summarize(annotated: &[AnnotatedPoint]) -> SeriesSummary {
    // ---
    let latest = annotated.last();
    let direction = match latest {
        Some(p) if p.trend > 0.0 => TrendDirection::Increasing,
        _ => TrendDirection::Decreasing,
    };

    SeriesSummary {
        points: annotated.len(),
        flagged: annotated.iter().filter(|p| p.is_anomaly || p.is_high).count(),
        anomalies: annotated.iter().filter(|p| p.is_anomaly).count(),
        breaches: annotated.iter().filter(|p| p.is_high).count(),
        latest_value: latest.map(|p| p.point.value),
        latest_trend: latest.map(|p| p.trend),
        direction,
    }
}
