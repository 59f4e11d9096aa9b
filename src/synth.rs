//! Series synthesizer.
//!
//! Fabricates date-anchored series for the dashboard charts. The random
//! source and the anchor date are both injected so callers (and tests) decide
//! how reproducible the output is.

use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use rand::Rng;
use serde::Serialize;

use crate::models::TimeSeriesPoint;

// ---

pub const DEFAULT_DAYS: u32 = 30;
pub const DEFAULT_BASE_VALUE: f64 = 100.0;
pub const DEFAULT_VARIANCE: f64 = 20.0;

/// Longest series any caller may request, about a century of days.
pub const MAX_DAYS: u32 = 36_525;

/// Shape of a synthesized series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesParams {
    // ---
    pub days: u32,
    pub base_value: f64,
    /// Full width of the uniform noise band centred on `base_value`.
    pub variance: f64,
}

impl Default for SeriesParams {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            base_value: DEFAULT_BASE_VALUE,
            variance: DEFAULT_VARIANCE,
        }
    }
}

/// Generate `params.days` points ending at `today`, oldest first.
///
/// Each value is `base_value` plus uniform noise in
/// `[-variance/2, variance/2)`, clamped at zero and rounded to two decimals.
/// `days == 0` yields an empty series. Every date is representable for
/// `days <= MAX_DAYS`; beyond that, points older than `NaiveDate::MIN` are
/// skipped and the series comes back shorter.
pub fn generate_series<R>(
    rng: &mut R,
    today: NaiveDate,
    params: SeriesParams,
) -> Vec<TimeSeriesPoint>
where
    R: Rng + ?Sized,
{
    // ---
    (0..params.days)
        .filter_map(|i| {
            let back = u64::from(params.days - 1 - i);
            let date = today.checked_sub_days(Days::new(back))?;
            let raw = params.base_value + noise(rng, params.variance);
            Some(TimeSeriesPoint::new(date, round2(raw.max(0.0))))
        })
        .collect()
}

/// [`generate_series`] anchored at the local date, using the thread RNG.
pub fn generate_series_now(params: SeriesParams) -> Vec<TimeSeriesPoint> {
    // ---
    generate_series(&mut rand::thread_rng(), Local::now().date_naive(), params)
}

/// A single live gauge reading: `base` perturbed by noise of width `range`.
///
/// Not clamped or rounded; gauges render whatever comes out.
pub fn realtime_metric<R: Rng + ?Sized>(rng: &mut R, base: f64, range: f64) -> f64 {
    base + noise(rng, range)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Info,
    Warning,
    Critical,
    Success,
}

const ALERT_KINDS: [AlertKind; 4] = [
    AlertKind::Info,
    AlertKind::Warning,
    AlertKind::Critical,
    AlertKind::Success,
];

const ALERT_MESSAGES: [&str; 6] = [
    "System optimization completed",
    "Temperature threshold exceeded",
    "Maintenance required",
    "Energy efficiency improved",
    "Security alert detected",
    "Equipment performance degraded",
];

/// A fabricated notification for the top bar feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoAlert {
    // ---
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Pick a random alert kind and message, stamped with `now`.
pub fn random_alert<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> DemoAlert {
    // ---
    let kind = ALERT_KINDS[rng.gen_range(0..ALERT_KINDS.len())];
    let message = ALERT_MESSAGES[rng.gen_range(0..ALERT_MESSAGES.len())];

    DemoAlert {
        id: now.timestamp_millis(),
        kind,
        message,
        timestamp: now,
    }
}

fn noise<R: Rng + ?Sized>(rng: &mut R, width: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * width
}

/// Round to two decimals the way chart labels expect.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
