//! Static reference tables consumed by the dashboard front-end.
//!
//! The table contents are part of the public wire format and must not drift. Each
//! table is derived from an exhaustive `match` on its enumeration, so adding a
//! variant refuses to compile until every table has an entry for it.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use super::types::{NewsCategory, PoliticalLeaning, StoryStatus};

/// Display metadata for one news category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub key: NewsCategory,
    pub label: &'static str,
    pub slug: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
}

impl NewsCategory {
    /// Human-readable display label.
    pub fn label(&self) -> &'static str {
        match self {
            NewsCategory::ArtsEntertainment => "Arts & Entertainment",
            NewsCategory::Business => "Business",
            NewsCategory::PopCulture => "Pop Culture",
            NewsCategory::CrimeLaw => "Crime & Law",
            NewsCategory::Politics => "Politics",
            NewsCategory::Science => "Science",
            NewsCategory::Sports => "Sports",
            NewsCategory::Technology => "Technology",
            NewsCategory::World => "World",
        }
    }

    /// URL path segment the dashboard uses for this category's page. Note
    /// that several slugs differ from the wire key ("pop-culture" pages live
    /// under "culture", "crime-law" under "law").
    pub fn slug(&self) -> &'static str {
        match self {
            NewsCategory::ArtsEntertainment => "artsentertainment",
            NewsCategory::Business => "business",
            NewsCategory::PopCulture => "culture",
            NewsCategory::CrimeLaw => "law",
            NewsCategory::Politics => "politics",
            NewsCategory::Science => "science",
            NewsCategory::Sports => "sports",
            NewsCategory::Technology => "technology",
            NewsCategory::World => "world",
        }
    }

    /// Resolve a category from its page slug.
    pub fn from_slug(slug: &str) -> Option<NewsCategory> {
        NewsCategory::ALL.iter().copied().find(|c| c.slug() == slug)
    }

    pub fn info(&self) -> CategoryInfo {
        CategoryInfo {
            key: *self,
            label: self.label(),
            slug: self.slug(),
            icon: None,
        }
    }
}

impl StoryStatus {
    /// Hex color the dashboard uses for this lifecycle state.
    pub fn color(&self) -> &'static str {
        match self {
            StoryStatus::Active => "#4ADE80",
            StoryStatus::Cooling => "#FBBF24",
            StoryStatus::Archived => "#8B9DC3",
        }
    }
}

impl PoliticalLeaning {
    /// Human-readable label for the leaning indicator.
    pub fn label(&self) -> &'static str {
        match self {
            PoliticalLeaning::Left => "Left",
            PoliticalLeaning::CenterLeft => "Center-Left",
            PoliticalLeaning::Neutral => "Neutral",
            PoliticalLeaning::CenterRight => "Center-Right",
            PoliticalLeaning::Right => "Right",
        }
    }
}

/// All category records, in dashboard display order.
pub static CATEGORIES: Lazy<Vec<CategoryInfo>> =
    Lazy::new(|| NewsCategory::ALL.iter().map(|c| c.info()).collect());

/// Status to hex color, total over `StoryStatus`.
pub static STATUS_COLORS: Lazy<HashMap<StoryStatus, &'static str>> =
    Lazy::new(|| StoryStatus::ALL.iter().map(|s| (*s, s.color())).collect());

/// Leaning to display label, total over `PoliticalLeaning`.
pub static LEANING_LABELS: Lazy<HashMap<PoliticalLeaning, &'static str>> =
    Lazy::new(|| PoliticalLeaning::ALL.iter().map(|l| (*l, l.label())).collect());
