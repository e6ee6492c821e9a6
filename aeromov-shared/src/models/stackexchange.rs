//! Wire and response shapes for the Stack Exchange search proxy.

use serde::{Deserialize, Serialize};

/// One question as returned by the search endpoint. The response-shaping
/// filter token trims the payload, so every non-key field gets a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub link: String,
    /// Unix timestamp (seconds).
    #[serde(default)]
    pub creation_date: i64,
    #[serde(default)]
    pub is_answered: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub title: String,
    pub score: i64,
    pub views: i64,
    pub link: String,
    /// ISO-8601 creation time.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTotals {
    pub total: usize,
    pub answered: usize,
    pub unanswered: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub stats: SearchTotals,
    pub top_scored: QuestionSummary,
    pub least_viewed: QuestionSummary,
    pub oldest: QuestionSummary,
    pub newest: QuestionSummary,
}
