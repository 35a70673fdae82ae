//! Read-only projections of a `NewsNode` for individual UI surfaces.
//!
//! Projections are snapshots taken at derivation time, not live references;
//! their fields must match the source node at that moment.

use serde::{Deserialize, Serialize};

use super::types::{NewsNode, PoliticalLeaning, StoryStatus};

/// Lightweight sidebar item derived from a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingItem {
    pub id: String,
    pub rank: u32,
    pub title: String,
    pub slug: String,
    pub is_active: bool,
}

impl From<&NewsNode> for TrendingItem {
    fn from(node: &NewsNode) -> Self {
        TrendingItem {
            id: node.id.clone(),
            rank: node.rank,
            title: node.title.clone(),
            slug: node.slug.clone(),
            is_active: node.status.is_active(),
        }
    }
}

/// Metrics-panel projection of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryStats {
    pub status: StoryStatus,
    pub duration: String,
    pub virality_score: f64,
    pub article_count: u32,
    pub political_leaning: PoliticalLeaning,
}

impl From<&NewsNode> for StoryStats {
    fn from(node: &NewsNode) -> Self {
        StoryStats {
            status: node.status,
            duration: node.duration.clone(),
            virality_score: node.virality_score,
            article_count: node.article_count,
            political_leaning: node.political_leaning,
        }
    }
}

/// A search suggestion, optionally resolving to a concrete story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSuggestion {
    pub id: String,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_slug: Option<String>,
}
