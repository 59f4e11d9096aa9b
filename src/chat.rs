//! Chat response selection.
//!
//! Questions are routed by case-insensitive substring matching against a
//! fixed, ordered rule table. The first rule with any matching keyword wins,
//! so "what issues with energy" is an issue question, not an energy one.

use serde::Serialize;

use crate::models::InsightResponse;
use crate::pages::{Highlight, PageDirectory, PageId};

// ---

/// Reply used when no rule matches.
pub const FALLBACK_TEXT: &str = "I can help you analyze data and identify issues! Try asking me about:\n\n\
• Current issues or problems\n\
• Trends and patterns\n\
• Recommendations for improvement\n\
• Specific metrics (energy, carbon, water)\n\
• Graph insights\n\n\
How can I assist you?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Issues,
    Trends,
    Recommendations,
    Carbon,
    Energy,
    Water,
}

/// Matching order. Earlier rows shadow later ones.
const RULES: [(&[&str], Topic); 6] = [
    (&["issue", "problem", "alert"], Topic::Issues),
    (&["trend", "pattern"], Topic::Trends),
    (&["recommend", "suggest", "improve"], Topic::Recommendations),
    (&["carbon", "emission"], Topic::Carbon),
    (&["energy"], Topic::Energy),
    (&["water"], Topic::Water),
];

/// Classify a question, or `None` when no keyword matches.
pub fn classify_question(question: &str) -> Option<Topic> {
    // ---
    let lower = question.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, topic)| *topic)
}

/// Routes chat questions to canned payloads.
///
/// Holds the page directory it draws recommendations from; it has no other
/// state.
#[derive(Debug, Clone, Copy)]
pub struct KeywordMatcher<'a> {
    directory: &'a PageDirectory,
}

impl<'a> KeywordMatcher<'a> {
    // ---
    pub fn new(directory: &'a PageDirectory) -> Self {
        Self { directory }
    }

    /// Answer `question` asked from `page`.
    ///
    /// `page` only matters for recommendation questions. Every input,
    /// including the empty string, gets a reply.
    pub fn respond(&self, question: &str, page: PageId) -> InsightResponse {
        // ---
        let Some(topic) = classify_question(question) else {
            return InsightResponse::Text {
                content: FALLBACK_TEXT.to_string(),
            };
        };

        let (content, issues): (&str, Vec<String>) = match topic {
            Topic::Issues => (
                "Based on the current data analysis, here are the key issues identified:",
                owned(&[
                    "Energy consumption peaked at 1,420 kWh on day 5 - 18% above average",
                    "Carbon emissions showed unusual spike correlating with energy peak",
                    "Water usage increased 12% during the same period",
                    "Recommendation: Investigate HVAC system efficiency and schedule maintenance",
                ]),
            ),
            Topic::Trends => (
                "Here are the trends I've identified from the data:",
                owned(&[
                    "Overall energy consumption shows 5% week-over-week reduction",
                    "Carbon emissions tracking 15% below target - excellent progress",
                    "Water conservation efforts showing consistent improvement",
                    "Waste management efficiency improved by 8% this period",
                ]),
            ),
            Topic::Recommendations => (
                "Here are my recommendations for improvement:",
                self.directory.get(page).recommendations.clone(),
            ),
            Topic::Carbon => (
                "Carbon Emissions Analysis:",
                owned(&[
                    "Current emissions: 2.8 tons CO2e/day - within target range",
                    "15% reduction achieved vs. last quarter",
                    "Main contributors: HVAC (45%), Lighting (25%), Equipment (30%)",
                    "Recommendation: Increase renewable energy percentage to reduce further",
                ]),
            ),
            Topic::Energy => (
                "Energy Consumption Insights:",
                owned(&[
                    "Average daily consumption: 1,250 kWh",
                    "Peak hours: 2-5 PM (28% above average)",
                    "65% sourced from renewable energy",
                    "Potential savings: 8-12% through load shifting and optimization",
                ]),
            ),
            Topic::Water => (
                "Water Usage Analysis:",
                owned(&[
                    "Daily average: 850 gallons - 12% below target",
                    "Exceeded conservation goals by 8%",
                    "Leak detection system prevented estimated 2,000 gallon waste",
                    "Opportunity: Implement greywater recycling for 15% additional savings",
                ]),
            ),
        };

        InsightResponse::Analysis {
            content: content.to_string(),
            issues,
        }
    }

    /// Messages the widget shows when it opens on `page`: greeting, then highlights.
    pub fn opening(&self, page: PageId) -> Vec<OpeningMessage> {
        // ---
        let insights = self.directory.get(page);
        vec![
            OpeningMessage::Greeting {
                content: insights.greeting.clone(),
            },
            OpeningMessage::Highlights {
                highlights: insights.highlights.clone(),
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OpeningMessage {
    Greeting { content: String },
    Highlights { highlights: Vec<Highlight> },
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn issues_of(response: &InsightResponse) -> &[String] {
        match response {
            InsightResponse::Analysis { issues, .. } => issues,
            InsightResponse::Text { .. } => panic!("expected analysis, got {response:?}"),
        }
    }

    #[test]
    fn test_rule_order() {
        // ---
        let cases = [
            ("Any problem today?", Some(Topic::Issues)),
            ("show ALERTS", Some(Topic::Issues)),
            ("what pattern do you see", Some(Topic::Trends)),
            ("suggest something", Some(Topic::Recommendations)),
            ("how do we improve", Some(Topic::Recommendations)),
            ("emissions this week", Some(Topic::Carbon)),
            ("energy usage", Some(Topic::Energy)),
            ("Water?", Some(Topic::Water)),
            ("hello", None),
            ("", None),
        ];
        for (question, expected) in cases {
            assert_eq!(classify_question(question), expected, "question: {question:?}");
        }
    }

    #[test]
    fn test_issue_outranks_energy() {
        // ---
        let directory = PageDirectory::builtin();
        let matcher = KeywordMatcher::new(&directory);
        let response = matcher.respond("what are the issues with energy", PageId::Home);

        assert_eq!(
            response.content(),
            "Based on the current data analysis, here are the key issues identified:"
        );
        assert_eq!(
            classify_question("what are the issues with energy"),
            Some(Topic::Issues)
        );
    }

    #[test]
    fn test_overlapping_keywords_take_first_rule() {
        // ---
        assert_eq!(
            classify_question("carbon emission trend for water and energy"),
            Some(Topic::Trends)
        );
        assert_eq!(classify_question("water energy"), Some(Topic::Energy));
        assert_eq!(
            classify_question("recommend ways to cut carbon"),
            Some(Topic::Recommendations)
        );
    }

    #[test]
    fn test_fallback_is_verbatim() {
        // ---
        let directory = PageDirectory::builtin();
        let matcher = KeywordMatcher::new(&directory);

        for question in ["hello", "", "   "] {
            assert_eq!(
                matcher.respond(question, PageId::Ops),
                InsightResponse::Text {
                    content: FALLBACK_TEXT.to_string()
                }
            );
        }
        assert!(FALLBACK_TEXT.starts_with("I can help you analyze data"));
        assert!(FALLBACK_TEXT.ends_with("How can I assist you?"));
    }

    #[test]
    fn test_recommendations_follow_page() {
        // ---
        let directory = PageDirectory::builtin();
        let matcher = KeywordMatcher::new(&directory);

        let sustain = matcher.respond("any recommendations?", PageId::Sustain);
        assert_eq!(issues_of(&sustain), directory.get(PageId::Sustain).recommendations);

        let ops = matcher.respond("any recommendations?", PageId::Ops);
        assert_eq!(issues_of(&ops), directory.get(PageId::Ops).recommendations);
    }

    #[test]
    fn test_topic_payloads_have_four_points() {
        // ---
        let directory = PageDirectory::builtin();
        let matcher = KeywordMatcher::new(&directory);

        for question in ["issue", "trend", "carbon", "energy", "water"] {
            let response = matcher.respond(question, PageId::Home);
            assert_eq!(issues_of(&response).len(), 4, "question: {question}");
        }
    }

    #[test]
    fn test_opening_sequence() {
        // ---
        let directory = PageDirectory::builtin();
        let matcher = KeywordMatcher::new(&directory);
        let messages = matcher.opening(PageId::Cvs);

        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[0],
            OpeningMessage::Greeting {
                content: "Computer Vision Systems Dashboard 📹".to_string()
            }
        );
        match &messages[1] {
            OpeningMessage::Highlights { highlights } => assert_eq!(highlights.len(), 3),
            other => panic!("expected highlights, got {other:?}"),
        }
    }
}
