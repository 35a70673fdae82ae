//! JSON response envelopes. Field names and nesting are normative for every
//! endpoint serving this data.

use serde::{Deserialize, Serialize};

use crate::model::{NewsNode, TrendingItem};

/// Envelope for the full news feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    pub timestamp: String,
    pub stories: Vec<NewsNode>,
    /// Total number of matching stories. Equals `stories.len()` here since
    /// responses are not paginated; a paginated producer may report more.
    pub total_count: u64,
}

impl NewsApiResponse {
    pub fn new(timestamp: impl Into<String>, stories: Vec<NewsNode>) -> Self {
        let total_count = stories.len() as u64;
        NewsApiResponse {
            timestamp: timestamp.into(),
            stories,
            total_count,
        }
    }
}

/// Envelope for the trending sidebar, ordered by rank ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingApiResponse {
    pub timestamp: String,
    pub trending: Vec<TrendingItem>,
    pub last_updated: String,
}
