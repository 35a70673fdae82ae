//! Type definitions for the trending-news data model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// News category enumeration matching the dashboard topic system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NewsCategory {
    ArtsEntertainment,
    Business,
    PopCulture,
    CrimeLaw,
    Politics,
    Science,
    Sports,
    Technology,
    World,
}

impl NewsCategory {
    /// Every category, in dashboard display order.
    pub const ALL: [NewsCategory; 9] = [
        NewsCategory::ArtsEntertainment,
        NewsCategory::Business,
        NewsCategory::PopCulture,
        NewsCategory::CrimeLaw,
        NewsCategory::Politics,
        NewsCategory::Science,
        NewsCategory::Sports,
        NewsCategory::Technology,
        NewsCategory::World,
    ];

    /// The wire identifier for this category.
    pub fn key(&self) -> &'static str {
        match self {
            NewsCategory::ArtsEntertainment => "arts-entertainment",
            NewsCategory::Business => "business",
            NewsCategory::PopCulture => "pop-culture",
            NewsCategory::CrimeLaw => "crime-law",
            NewsCategory::Politics => "politics",
            NewsCategory::Science => "science",
            NewsCategory::Sports => "sports",
            NewsCategory::Technology => "technology",
            NewsCategory::World => "world",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Lifecycle state of a news story. Stories only decay: active stories cool
/// off, cooled stories get archived. The transition itself is performed by the
/// ingestion pipeline; this crate only represents and checks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryStatus {
    Active,
    Cooling,
    Archived,
}

impl StoryStatus {
    pub const ALL: [StoryStatus; 3] = [
        StoryStatus::Active,
        StoryStatus::Cooling,
        StoryStatus::Archived,
    ];

    pub fn is_active(&self) -> bool {
        matches!(self, StoryStatus::Active)
    }

    // Position on the decay path: active < cooling < archived.
    fn decay_step(&self) -> u8 {
        match self {
            StoryStatus::Active => 0,
            StoryStatus::Cooling => 1,
            StoryStatus::Archived => 2,
        }
    }

    /// Whether moving from `self` to `next` respects the forward-only
    /// lifecycle. Staying in the same state counts as a legal transition.
    pub fn can_transition_to(&self, next: StoryStatus) -> bool {
        next.decay_step() >= self.decay_step()
    }
}

impl fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryStatus::Active => write!(f, "active"),
            StoryStatus::Cooling => write!(f, "cooling"),
            StoryStatus::Archived => write!(f, "archived"),
        }
    }
}

/// Perceived political bias of a story's coverage, on a 5-point ordinal scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoliticalLeaning {
    Left,
    CenterLeft,
    Neutral,
    CenterRight,
    Right,
}

impl PoliticalLeaning {
    pub const ALL: [PoliticalLeaning; 5] = [
        PoliticalLeaning::Left,
        PoliticalLeaning::CenterLeft,
        PoliticalLeaning::Neutral,
        PoliticalLeaning::CenterRight,
        PoliticalLeaning::Right,
    ];
}

/// Overall sentiment of a one-sided perspective summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

/// Narrative weight of a single breakdown point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
}

/// Timeframe filter accepted by the news feed endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeframeFilter {
    #[serde(rename = "now")]
    Now,
    #[serde(rename = "7days")]
    Past7Days,
    #[serde(rename = "30days")]
    Past30Days,
}

impl TimeframeFilter {
    pub const ALL: [TimeframeFilter; 3] = [
        TimeframeFilter::Now,
        TimeframeFilter::Past7Days,
        TimeframeFilter::Past30Days,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeframeFilter::Now => "now",
            TimeframeFilter::Past7Days => "7days",
            TimeframeFilter::Past30Days => "30days",
        }
    }

    /// Parse a query-string value. Unknown values are `None`, never a default.
    pub fn parse(value: &str) -> Option<TimeframeFilter> {
        TimeframeFilter::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == value)
    }
}

/// One trending story cluster: a grouped set of related articles treated as a
/// single news event. Produced by the external ingestion pipeline; everything
/// here is data it computed, including the AI-generated prose fields.
///
/// Timestamps stay ISO-8601 strings on the wire to keep the format
/// language-agnostic; validation parses them without changing the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsNode {
    pub id: String,
    // URL-friendly identifier, stable per story (e.g. "vonn-crash")
    pub slug: String,
    // Short trending title (e.g. "Vonn Crash")
    pub title: String,
    // Full headline
    pub headline: String,
    // Generated summary paragraph
    pub summary: String,
    pub image_url: String,
    pub categories: Vec<NewsCategory>,
    pub keywords: Vec<String>,

    // Metrics
    pub rank: u32,
    pub virality_score: f64,
    pub article_count: u32,
    // How long the story has been trending (e.g. "4D")
    pub duration: String,
    pub status: StoryStatus,
    pub political_leaning: PoliticalLeaning,

    // Generated content
    pub breakdown: Vec<BreakdownPoint>,
    pub left_perspective: PerspectiveAnalysis,
    pub right_perspective: PerspectiveAnalysis,
    pub learning_questions: Vec<String>,

    // Related articles
    pub articles: Vec<ExternalArticle>,

    // Timestamps (ISO-8601)
    pub first_seen: String,
    pub last_updated: String,
}

/// A key point in the story breakdown. Order within the breakdown list is
/// narrative order and is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownPoint {
    pub id: String,
    pub text: String,
    pub importance: Importance,
}

/// One-sided analysis of how a story is framed. A node carries two of these,
/// left and right; the type is the same, only the holding field differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerspectiveAnalysis {
    pub summary: String,
    pub article_count: u32,
    pub sentiment: Sentiment,
}

/// Reference to a published article from an external source. Owned by exactly
/// one node's article list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalArticle {
    pub id: String,
    // Publisher display name, conventionally upper-case (e.g. "THE GUARDIAN")
    pub source: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub published_at: String,
}
