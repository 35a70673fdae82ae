//! Invariant checks over nodes and snapshots.
//!
//! Producers of this data (the ingestion pipeline) and consumers (the API
//! layer, the audit tool) both run these checks; malformed data is reported
//! with the offending field path, never coerced or dropped.

use chrono::{DateTime, FixedOffset};
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;
use url::Url;

use super::projections::TrendingItem;
use super::types::{NewsNode, StoryStatus};
use super::{MAX_RANK, MAX_VIRALITY_SCORE, MIN_RANK, MIN_VIRALITY_SCORE};
use crate::TARGET_SNAPSHOT;

/// A structured validation failure: the field path plus the violated
/// invariant.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing, blank, or structurally wrong.
    #[error("{field}: {message}")]
    Shape { field: String, message: String },

    /// A numeric field is outside its documented bounds.
    #[error("{field}: {value} is outside {min}..={max}")]
    Range {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A value is not a member of its fixed enumeration.
    #[error("{field}: '{value}' is not a valid {expected}")]
    Enum {
        field: String,
        value: String,
        expected: &'static str,
    },

    /// A cross-field or cross-snapshot invariant is broken.
    #[error("{field}: {message}")]
    Consistency { field: String, message: String },
}

/// How strictly `articleCount` is checked against the `articles` list.
/// Whether the count may exceed a truncated list is up to the ingestion
/// pipeline, so the check is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountMode {
    /// `articleCount` must equal `articles.len()`.
    #[default]
    Strict,
    /// `articleCount` may exceed `articles.len()` (truncated list).
    AtLeast,
    /// No check.
    Off,
}

impl CountMode {
    pub fn parse(value: &str) -> Option<CountMode> {
        match value {
            "strict" => Some(CountMode::Strict),
            "at-least" => Some(CountMode::AtLeast),
            "off" => Some(CountMode::Off),
            _ => None,
        }
    }
}

/// Parse an ISO-8601 date-time field, reporting a shape error on failure.
pub fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<FixedOffset>, ValidationError> {
    DateTime::parse_from_rfc3339(value).map_err(|e| ValidationError::Shape {
        field: field.to_string(),
        message: format!("'{}' is not an ISO-8601 date-time: {}", value, e),
    })
}

fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Shape {
            field: field.to_string(),
            message: "required field is blank".to_string(),
        });
    }
    Ok(())
}

/// Check a single node against the documented invariants.
pub fn validate_node(node: &NewsNode, counts: CountMode) -> Result<(), ValidationError> {
    require_text("id", &node.id)?;
    require_text("slug", &node.slug)?;
    require_text("title", &node.title)?;

    if !(MIN_RANK..=MAX_RANK).contains(&node.rank) {
        return Err(ValidationError::Range {
            field: "rank".to_string(),
            value: node.rank as f64,
            min: MIN_RANK as f64,
            max: MAX_RANK as f64,
        });
    }

    if !(MIN_VIRALITY_SCORE..=MAX_VIRALITY_SCORE).contains(&node.virality_score) {
        return Err(ValidationError::Range {
            field: "viralityScore".to_string(),
            value: node.virality_score,
            min: MIN_VIRALITY_SCORE,
            max: MAX_VIRALITY_SCORE,
        });
    }

    if node.categories.is_empty() {
        return Err(ValidationError::Shape {
            field: "categories".to_string(),
            message: "at least one category is required".to_string(),
        });
    }
    let mut seen_categories = HashSet::new();
    for category in &node.categories {
        if !seen_categories.insert(*category) {
            return Err(ValidationError::Consistency {
                field: "categories".to_string(),
                message: format!("category '{}' appears more than once", category),
            });
        }
    }

    match counts {
        CountMode::Strict => {
            if node.article_count as usize != node.articles.len() {
                return Err(ValidationError::Consistency {
                    field: "articleCount".to_string(),
                    message: format!(
                        "articleCount is {} but {} articles are attached",
                        node.article_count,
                        node.articles.len()
                    ),
                });
            }
        }
        CountMode::AtLeast => {
            if (node.article_count as usize) < node.articles.len() {
                return Err(ValidationError::Consistency {
                    field: "articleCount".to_string(),
                    message: format!(
                        "articleCount is {} but {} articles are attached",
                        node.article_count,
                        node.articles.len()
                    ),
                });
            }
        }
        CountMode::Off => {}
    }

    let first_seen = parse_timestamp("firstSeen", &node.first_seen)?;
    let last_updated = parse_timestamp("lastUpdated", &node.last_updated)?;
    if first_seen > last_updated {
        return Err(ValidationError::Consistency {
            field: "firstSeen".to_string(),
            message: format!(
                "firstSeen {} is after lastUpdated {}",
                node.first_seen, node.last_updated
            ),
        });
    }

    for (index, article) in node.articles.iter().enumerate() {
        require_text(&format!("articles[{}].id", index), &article.id)?;
        if Url::parse(&article.url).is_err() {
            return Err(ValidationError::Shape {
                field: format!("articles[{}].url", index),
                message: format!("'{}' is not an absolute URL", article.url),
            });
        }
        parse_timestamp(&format!("articles[{}].publishedAt", index), &article.published_at)?;
    }

    Ok(())
}

// Cross-node checks: identity uniqueness plus dense rank coverage from 1.
fn cross_checks(nodes: &[NewsNode]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut slugs = HashSet::new();
    let mut ids = HashSet::new();
    let mut ranks = HashSet::new();
    for node in nodes {
        if !slugs.insert(node.slug.as_str()) {
            errors.push(ValidationError::Consistency {
                field: "slug".to_string(),
                message: format!("slug '{}' is used by more than one story", node.slug),
            });
        }
        if !ids.insert(node.id.as_str()) {
            errors.push(ValidationError::Consistency {
                field: "id".to_string(),
                message: format!("id '{}' is used by more than one story", node.id),
            });
        }
        if !ranks.insert(node.rank) {
            errors.push(ValidationError::Consistency {
                field: "rank".to_string(),
                message: format!("rank {} is held by more than one story", node.rank),
            });
        }
    }

    // Ranks must cover 1..=n with no gaps.
    let mut sorted: Vec<u32> = ranks.into_iter().collect();
    sorted.sort_unstable();
    for (position, rank) in sorted.iter().enumerate() {
        let expected = position as u32 + 1;
        if *rank != expected {
            errors.push(ValidationError::Consistency {
                field: "rank".to_string(),
                message: format!("ranks are not dense from 1: expected {}, found {}", expected, rank),
            });
            break;
        }
    }

    errors
}

/// Run every check over a snapshot's node set and collect all violations.
/// Used by the audit tool, which reports them one by one.
pub fn audit_snapshot(nodes: &[NewsNode], counts: CountMode) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for node in nodes {
        if let Err(e) = validate_node(node, counts) {
            errors.push(e);
        }
    }
    errors.extend(cross_checks(nodes));
    errors
}

/// Check a snapshot's node set, failing on the first violation.
pub fn validate_snapshot(nodes: &[NewsNode], counts: CountMode) -> Result<(), ValidationError> {
    match audit_snapshot(nodes, counts).into_iter().next() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Check that a trending list is ordered by rank ascending. The serving path
/// sorts before building the envelope, so this is for data arriving from
/// outside.
pub fn check_rank_ordered(items: &[TrendingItem]) -> Result<(), ValidationError> {
    for window in items.windows(2) {
        if window[0].rank > window[1].rank {
            return Err(ValidationError::Consistency {
                field: "trending".to_string(),
                message: format!(
                    "list is not rank-ordered: {} precedes {}",
                    window[0].rank, window[1].rank
                ),
            });
        }
    }
    Ok(())
}

/// Check a status change against the forward-only lifecycle. A skip straight
/// from active to archived is accepted but logged, since the documented model
/// passes through cooling; a regression is rejected.
pub fn validate_transition(
    slug: &str,
    from: StoryStatus,
    to: StoryStatus,
) -> Result<(), ValidationError> {
    if !from.can_transition_to(to) {
        return Err(ValidationError::Consistency {
            field: "status".to_string(),
            message: format!("story '{}' regressed from {} to {}", slug, from, to),
        });
    }
    if from == StoryStatus::Active && to == StoryStatus::Archived {
        warn!(
            target: TARGET_SNAPSHOT,
            "story '{}' went from active to archived without cooling", slug
        );
    }
    Ok(())
}

/// Check a new revision of a node against its previous revision: `firstSeen`
/// never changes, `lastUpdated` never moves backwards, status never regresses.
pub fn validate_update(previous: &NewsNode, next: &NewsNode) -> Result<(), ValidationError> {
    validate_transition(&next.slug, previous.status, next.status)?;

    if previous.first_seen != next.first_seen {
        return Err(ValidationError::Consistency {
            field: "firstSeen".to_string(),
            message: format!(
                "story '{}' changed firstSeen from {} to {}",
                next.slug, previous.first_seen, next.first_seen
            ),
        });
    }

    let before = parse_timestamp("lastUpdated", &previous.last_updated)?;
    let after = parse_timestamp("lastUpdated", &next.last_updated)?;
    if after < before {
        return Err(ValidationError::Consistency {
            field: "lastUpdated".to_string(),
            message: format!(
                "story '{}' moved lastUpdated backwards from {} to {}",
                next.slug, previous.last_updated, next.last_updated
            ),
        });
    }

    Ok(())
}
