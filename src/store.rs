//! In-memory holder of the current trending snapshot.
//!
//! The ingestion pipeline computes snapshots and writes them as a
//! `NewsApiResponse`-shaped JSON file; this store loads that file, validates
//! it, and serves it to the API layer. The snapshot behind the lock is
//! replaced wholesale, never mutated, so readers only ever see a complete,
//! validated snapshot.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use chrono::{Duration, Utc};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::api::types::{NewsApiResponse, TrendingApiResponse};
use crate::environment;
use crate::model::{
    parse_timestamp, validate_snapshot, validate_update, CountMode, NewsCategory, NewsNode,
    SearchSuggestion, StoryStats, TimeframeFilter, TrendingItem, ValidationError,
};
use crate::TARGET_SNAPSHOT;

/// Maximum number of search suggestions returned for one query
pub const MAX_SUGGESTIONS: usize = 8;

/// Failure to load or apply a snapshot file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read snapshot file: {0}")]
    Io(#[from] io::Error),

    #[error("snapshot file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("snapshot failed validation: {0}")]
    Invalid(#[from] ValidationError),
}

/// One trending snapshot as produced by the ingestion pipeline.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub timestamp: String,
    pub nodes: Vec<NewsNode>,
}

pub struct NewsStore {
    snapshot_path: Option<PathBuf>,
    count_mode: CountMode,
    current: RwLock<Arc<Snapshot>>,
}

impl NewsStore {
    pub fn new(snapshot_path: Option<PathBuf>, count_mode: CountMode) -> Self {
        NewsStore {
            snapshot_path,
            count_mode,
            current: RwLock::new(Arc::new(Snapshot::default())),
        }
    }

    /// Process-wide store, configured from the environment and loaded from
    /// the snapshot file on first use. A missing or broken file logs and
    /// leaves the store empty; `/refresh` can pick it up later.
    pub async fn instance() -> &'static NewsStore {
        static INSTANCE: OnceCell<NewsStore> = OnceCell::const_new();

        INSTANCE
            .get_or_init(|| async {
                let store = NewsStore::new(environment::snapshot_path(), environment::count_mode());
                match &store.snapshot_path {
                    Some(path) => match store.reload() {
                        Ok(count) => {
                            info!(
                                target: TARGET_SNAPSHOT,
                                "Loaded {} stories from {}", count, path.display()
                            );
                        }
                        Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                            warn!(
                                target: TARGET_SNAPSHOT,
                                "Snapshot file {} not found; starting empty", path.display()
                            );
                        }
                        Err(e) => {
                            error!(
                                target: TARGET_SNAPSHOT,
                                "Failed to load snapshot from {}: {}", path.display(), e
                            );
                        }
                    },
                    None => {
                        warn!(
                            target: TARGET_SNAPSHOT,
                            "MONZA_SNAPSHOT_PATH not set; starting empty"
                        );
                    }
                }
                store
            })
            .await
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().unwrap().clone()
    }

    pub fn story_count(&self) -> usize {
        self.snapshot().nodes.len()
    }

    /// Swap in a new snapshot after checking it, including the monotonicity
    /// invariants against the stories it replaces.
    pub fn apply(&self, incoming: Snapshot) -> Result<(), ValidationError> {
        validate_snapshot(&incoming.nodes, self.count_mode)?;

        let current = self.snapshot();
        for node in &incoming.nodes {
            if let Some(previous) = current.nodes.iter().find(|n| n.slug == node.slug) {
                validate_update(previous, node)?;
            }
        }

        *self.current.write().unwrap() = Arc::new(incoming);
        Ok(())
    }

    /// Re-read the snapshot file and apply it.
    pub fn reload(&self) -> Result<usize, StoreError> {
        let Some(path) = &self.snapshot_path else {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "MONZA_SNAPSHOT_PATH is not set",
            )));
        };

        let snapshot = read_snapshot(path)?;
        let count = snapshot.nodes.len();
        self.apply(snapshot)?;

        info!(target: TARGET_SNAPSHOT, "Snapshot applied: {} stories", count);
        Ok(count)
    }

    /// The full feed, optionally narrowed by a timeframe filter.
    pub fn news_response(&self, timeframe: Option<TimeframeFilter>) -> NewsApiResponse {
        let snapshot = self.snapshot();
        let stories: Vec<NewsNode> = snapshot
            .nodes
            .iter()
            .filter(|node| matches_timeframe(node, timeframe))
            .cloned()
            .collect();
        NewsApiResponse::new(snapshot.timestamp.clone(), stories)
    }

    /// The trending sidebar projection, rank ascending.
    pub fn trending_response(&self) -> TrendingApiResponse {
        let snapshot = self.snapshot();
        let mut trending: Vec<TrendingItem> =
            snapshot.nodes.iter().map(TrendingItem::from).collect();
        trending.sort_by_key(|item| item.rank);

        TrendingApiResponse {
            timestamp: snapshot.timestamp.clone(),
            last_updated: latest_update(&snapshot),
            trending,
        }
    }

    pub fn node_by_slug(&self, slug: &str) -> Option<NewsNode> {
        self.snapshot()
            .nodes
            .iter()
            .find(|node| node.slug == slug)
            .cloned()
    }

    pub fn stats_for(&self, slug: &str) -> Option<StoryStats> {
        self.snapshot()
            .nodes
            .iter()
            .find(|node| node.slug == slug)
            .map(StoryStats::from)
    }

    /// The feed narrowed to one category.
    pub fn category_response(&self, category: NewsCategory) -> NewsApiResponse {
        let snapshot = self.snapshot();
        let stories: Vec<NewsNode> = snapshot
            .nodes
            .iter()
            .filter(|node| node.categories.contains(&category))
            .cloned()
            .collect();
        NewsApiResponse::new(snapshot.timestamp.clone(), stories)
    }

    /// Suggestions for a partial search query, matched case-insensitively
    /// against titles, headlines and keywords.
    pub fn suggestions(&self, query: &str) -> Vec<SearchSuggestion> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.snapshot()
            .nodes
            .iter()
            .filter(|node| {
                node.title.to_lowercase().contains(&needle)
                    || node.headline.to_lowercase().contains(&needle)
                    || node
                        .keywords
                        .iter()
                        .any(|keyword| keyword.to_lowercase().contains(&needle))
            })
            .take(MAX_SUGGESTIONS)
            .map(|node| SearchSuggestion {
                id: Uuid::new_v4().to_string(),
                query: node.title.clone(),
                node_slug: Some(node.slug.clone()),
            })
            .collect()
    }
}

fn matches_timeframe(node: &NewsNode, timeframe: Option<TimeframeFilter>) -> bool {
    let days = match timeframe {
        None => return true,
        Some(TimeframeFilter::Now) => return node.status.is_active(),
        Some(TimeframeFilter::Past7Days) => 7,
        Some(TimeframeFilter::Past30Days) => 30,
    };

    match parse_timestamp("lastUpdated", &node.last_updated) {
        Ok(updated) => updated.with_timezone(&Utc) >= Utc::now() - Duration::days(days),
        // Nodes are validated on the way in, so this should not happen;
        // exclude rather than guess.
        Err(_) => false,
    }
}

// The most recent lastUpdated across the snapshot, falling back to the
// snapshot timestamp when the snapshot is empty.
fn latest_update(snapshot: &Snapshot) -> String {
    snapshot
        .nodes
        .iter()
        .filter_map(|node| {
            parse_timestamp("lastUpdated", &node.last_updated)
                .ok()
                .map(|parsed| (parsed, node.last_updated.clone()))
        })
        .max_by_key(|(parsed, _)| *parsed)
        .map(|(_, raw)| raw)
        .unwrap_or_else(|| snapshot.timestamp.clone())
}

/// Read and parse a snapshot file, checking the envelope-level invariant.
fn read_snapshot(path: &Path) -> Result<Snapshot, StoreError> {
    let raw = fs::read_to_string(path)?;
    let response: NewsApiResponse = serde_json::from_str(&raw)?;

    if (response.total_count as usize) < response.stories.len() {
        return Err(StoreError::Invalid(ValidationError::Consistency {
            field: "totalCount".to_string(),
            message: format!(
                "totalCount is {} but {} stories are present",
                response.total_count,
                response.stories.len()
            ),
        }));
    }

    Ok(Snapshot {
        timestamp: response.timestamp,
        nodes: response.stories,
    })
}
