//! Page insight directory.
//!
//! Static greeting, highlights and recommendations for each dashboard page.
//! The directory is plain immutable data: build it once with
//! [`PageDirectory::builtin`] and hand it to whoever needs it.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// ---

/// Dashboard page tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    Home,
    Advisory,
    Cvs,
    Twin,
    Command,
    Sustain,
    Ops,
}

impl PageId {
    // ---
    pub const ALL: [PageId; 7] = [
        PageId::Home,
        PageId::Advisory,
        PageId::Cvs,
        PageId::Twin,
        PageId::Command,
        PageId::Sustain,
        PageId::Ops,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::Advisory => "advisory",
            PageId::Cvs => "cvs",
            PageId::Twin => "twin",
            PageId::Command => "command",
            PageId::Sustain => "sustain",
            PageId::Ops => "ops",
        }
    }

    /// Case-insensitive lookup; anything unrecognized is `Home`.
    pub fn resolve(tag: &str) -> PageId {
        tag.parse().unwrap_or(PageId::Home)
    }
}

impl FromStr for PageId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        PageId::ALL
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or(())
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub severity: Severity,
    pub text: String,
}

/// Everything the chat widget knows about one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInsights {
    // ---
    pub greeting: String,
    pub highlights: Vec<Highlight>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PageDirectory {
    home: PageInsights,
    entries: HashMap<PageId, PageInsights>,
}

impl PageDirectory {
    // ---
    /// Build a directory from explicit entries.
    ///
    /// Returns `None` when no `Home` entry is present, since it is the
    /// fallback for every lookup.
    pub fn new(mut entries: HashMap<PageId, PageInsights>) -> Option<Self> {
        let home = entries.remove(&PageId::Home)?;
        Some(PageDirectory { home, entries })
    }

    /// Insights for `page`, falling back to the home bundle.
    pub fn get(&self, page: PageId) -> &PageInsights {
        // ---
        self.entries.get(&page).unwrap_or(&self.home)
    }

    /// Insights for a raw page tag, case-insensitive, falling back to home.
    pub fn lookup(&self, tag: &str) -> &PageInsights {
        self.get(PageId::resolve(tag))
    }

    /// The canned dashboard copy.
    pub fn builtin() -> Self {
        // ---
        use Severity::*;

        let home = bundle(
            "Welcome to InfAIra Dashboard! 👋",
            &[
                (Success, "All critical systems operational"),
                (Info, "45 active alerts across all facilities"),
                (Success, "Overall facility efficiency: 94.2%"),
            ],
            &[
                "Review pending alerts in Command Center",
                "Check sustainability metrics for optimization opportunities",
            ],
        );

        let entries = HashMap::from([
            (
                PageId::Sustain,
                bundle(
                    "Welcome to Sustainability Dashboard! 🌱",
                    &[
                        (Success, "Carbon emissions reduced by 15% this quarter"),
                        (Warning, "Energy consumption spiked 8% last week - investigation needed"),
                        (Success, "Water conservation target exceeded by 12%"),
                        (Info, "Renewable energy usage at 65% - ahead of annual target"),
                    ],
                    &[
                        "Consider increasing solar panel capacity to reach 75% renewable energy",
                        "Schedule energy audit for high-consumption areas identified last week",
                        "Implement rainwater harvesting to further reduce water costs",
                    ],
                ),
            ),
            (
                PageId::Command,
                bundle(
                    "Command Center Active 🎯",
                    &[
                        (Warning, "12 critical alerts require immediate attention"),
                        (Success, "Response time improved by 23%"),
                        (Info, "87% of alerts resolved within SLA"),
                    ],
                    &[
                        "Prioritize critical security alerts in Zone A",
                        "Review automation rules to reduce false positives",
                    ],
                ),
            ),
            (
                PageId::Cvs,
                bundle(
                    "Computer Vision Systems Dashboard 📹",
                    &[
                        (Success, "98.5% detection accuracy across all cameras"),
                        (Warning, "3 PPE violations detected today"),
                        (Info, "Fire detection system active on all floors"),
                    ],
                    &[
                        "Schedule camera calibration for optimal night vision",
                        "Review PPE compliance training for affected departments",
                    ],
                ),
            ),
            (
                PageId::Ops,
                bundle(
                    "Operations Dashboard Active ⚙️",
                    &[
                        (Success, "Equipment uptime at 96.7%"),
                        (Warning, "Predictive maintenance due for 3 critical assets"),
                        (Success, "Workforce efficiency increased by 11%"),
                    ],
                    &[
                        "Schedule maintenance window for flagged equipment",
                        "Optimize shift patterns based on workload analysis",
                    ],
                ),
            ),
            (
                PageId::Twin,
                bundle(
                    "Digital Twin Environment 🏢",
                    &[
                        (Success, "Real-time synchronization at 99.9%"),
                        (Info, "Simulation models updated with latest sensor data"),
                        (Success, "Space utilization optimized by 8%"),
                    ],
                    &[
                        "Run predictive scenarios for next quarter planning",
                        "Review IoT sensor health for optimal data accuracy",
                    ],
                ),
            ),
            (
                PageId::Advisory,
                bundle(
                    "Advisory & Insights Hub 💡",
                    &[
                        (Info, "15 new recommendations generated this week"),
                        (Success, "Cost savings opportunities: $45K identified"),
                        (Success, "85% of previous recommendations implemented"),
                    ],
                    &[
                        "Review high-impact cost optimization strategies",
                        "Schedule quarterly strategy session with stakeholders",
                    ],
                ),
            ),
        ]);

        PageDirectory { home, entries }
    }
}

fn bundle(
    greeting: &str,
    highlights: &[(Severity, &str)],
    recommendations: &[&str],
) -> PageInsights {
    // ---
    PageInsights {
        greeting: greeting.to_string(),
        highlights: highlights
            .iter()
            .map(|(severity, text)| Highlight {
                severity: *severity,
                text: text.to_string(),
            })
            .collect(),
        recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
    }
}
