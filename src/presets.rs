//! Named chart configurations used across the dashboard pages.

use std::str::FromStr;

use serde::Serialize;

use crate::error::InsightError;
use crate::synth::SeriesParams;

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricPreset {
    Energy,
    Water,
    Carbon,
    Waste,
    CommandEnergy,
    OpsPerformance,
}

/// Series shape plus the target line drawn on the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    pub params: SeriesParams,
    pub threshold: f64,
    pub unit: &'static str,
}

impl MetricPreset {
    // ---
    pub const ALL: [MetricPreset; 6] = [
        MetricPreset::Energy,
        MetricPreset::Water,
        MetricPreset::Carbon,
        MetricPreset::Waste,
        MetricPreset::CommandEnergy,
        MetricPreset::OpsPerformance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricPreset::Energy => "energy",
            MetricPreset::Water => "water",
            MetricPreset::Carbon => "carbon",
            MetricPreset::Waste => "waste",
            MetricPreset::CommandEnergy => "command-energy",
            MetricPreset::OpsPerformance => "ops-performance",
        }
    }

    pub fn chart(&self) -> ChartConfig {
        // ---
        let (days, base_value, variance, threshold, unit) = match self {
            MetricPreset::Energy => (7, 1200.0, 150.0, 1300.0, "kWh"),
            MetricPreset::Water => (7, 15000.0, 2000.0, 16000.0, "L"),
            MetricPreset::Carbon => (7, 150.0, 20.0, 160.0, "kg CO₂"),
            MetricPreset::Waste => (7, 500.0, 50.0, 520.0, "kg"),
            MetricPreset::CommandEnergy => (24, 1200.0, 200.0, 1300.0, "kWh"),
            MetricPreset::OpsPerformance => (90, 85.0, 10.0, 90.0, "%"),
        };

        ChartConfig {
            params: SeriesParams {
                days,
                base_value,
                variance,
            },
            threshold,
            unit,
        }
    }
}

impl FromStr for MetricPreset {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricPreset::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| InsightError::UnknownPreset(s.to_string()))
    }
}
