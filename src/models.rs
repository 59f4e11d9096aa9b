//! Value records shared by the synthesizer, the classifier and the chat layer.
//!
//! Everything here is created fresh per request and never mutated after
//! construction.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

// ---

/// A single dated sample of a synthesized series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    // ---
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub value: f64,
    /// Midnight UTC of `date`, in epoch milliseconds.
    pub timestamp: i64,
}

impl TimeSeriesPoint {
    // ---
    pub fn new(date: NaiveDate, value: f64) -> Self {
        // ---
        let timestamp = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default();

        Self {
            date,
            value,
            timestamp,
        }
    }
}

/// Display status of an annotated point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointStatus {
    Normal,
    /// Statistical anomaly. Takes precedence over `Alert`.
    Warning,
    /// Above the supplied threshold but not anomalous.
    Alert,
}

/// Signed percentage difference from the series average, one decimal place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deviation {
    Percent(f64),
    /// The series average was zero, so no percentage exists.
    Undefined,
}

impl Deviation {
    // ---
    /// Build from a raw percentage, rounding to one decimal.
    ///
    /// Negative zero collapses to zero so it renders as `0.0`.
    pub fn from_percent(raw: f64) -> Self {
        // ---
        if !raw.is_finite() {
            return Deviation::Undefined;
        }
        let rounded = (raw * 10.0).round() / 10.0;
        Deviation::Percent(if rounded == 0.0 { 0.0 } else { rounded })
    }
}

impl fmt::Display for Deviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deviation::Percent(v) => write!(f, "{v:.1}"),
            Deviation::Undefined => f.write_str("n/a"),
        }
    }
}

impl Serialize for Deviation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Deviation::Percent(_) => serializer.collect_str(self),
            Deviation::Undefined => serializer.serialize_none(),
        }
    }
}

/// A series point enriched with statistics relative to its whole series.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedPoint {
    // ---
    #[serde(flatten)]
    pub point: TimeSeriesPoint,
    pub average: f64,
    pub threshold: f64,
    pub is_anomaly: bool,
    pub is_high: bool,
    pub status: PointStatus,
    pub trend: f64,
    pub deviation: Deviation,
}

/// Chat reply payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InsightResponse {
    Analysis {
        content: String,
        issues: Vec<String>,
    },
    Text {
        content: String,
    },
}

impl InsightResponse {
    // ---
    pub fn content(&self) -> &str {
        match self {
            InsightResponse::Analysis { content, .. } | InsightResponse::Text { content } => {
                content
            }
        }
    }
}
