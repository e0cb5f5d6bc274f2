//! CMS placement tree and the news plugins that live in it.
//!
//! A placeholder slot holds an ordered list of top-level placements. A news
//! feed placement contains child placements; the children of interest are
//! news-item plugins of the feed's category, but other applications may put
//! arbitrary plugins there too.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use shared::validation::{validate_not_blank, validate_slot_name};

use super::category::NewsCategory;

const FEED_SUFFIX: &str = "_news_feed";
const ITEM_SUFFIX: &str = "_news_item";

/// Plugin type stored on a placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PluginType {
    NewsFeed(NewsCategory),
    NewsItem(NewsCategory),
    /// A plugin owned by some other CMS application.
    Other(String),
}

impl PluginType {
    /// Parses a stored plugin type; anything unrecognised is `Other`.
    pub fn parse(s: &str) -> Self {
        let category_of = |prefix: &str| {
            NewsCategory::ALL
                .into_iter()
                .find(|c| c.as_str() == prefix)
        };
        if let Some(prefix) = s.strip_suffix(FEED_SUFFIX) {
            if let Some(category) = category_of(prefix) {
                return PluginType::NewsFeed(category);
            }
        }
        if let Some(prefix) = s.strip_suffix(ITEM_SUFFIX) {
            if let Some(category) = category_of(prefix) {
                return PluginType::NewsItem(category);
            }
        }
        PluginType::Other(s.to_string())
    }

    /// Human readable plugin name as shown in the CMS toolbar.
    pub fn name(&self) -> String {
        match self {
            PluginType::NewsFeed(c) => format!("{} News Feed", c.short_name()),
            PluginType::NewsItem(c) => format!("{} News Item", c.short_name()),
            PluginType::Other(name) => name.clone(),
        }
    }

    /// The only child plugin type a container accepts, if any.
    pub fn child_type(&self) -> Option<PluginType> {
        match self {
            PluginType::NewsFeed(c) => Some(PluginType::NewsItem(*c)),
            _ => None,
        }
    }
}

impl fmt::Display for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginType::NewsFeed(c) => write!(f, "{}{}", c.as_str(), FEED_SUFFIX),
            PluginType::NewsItem(c) => write!(f, "{}{}", c.as_str(), ITEM_SUFFIX),
            PluginType::Other(name) => write!(f, "{}", name),
        }
    }
}

impl Serialize for PluginType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A node in the placement tree.
#[derive(Debug, Clone, Serialize)]
pub struct Placement {
    pub id: i64,
    pub placeholder: String,
    pub parent_id: Option<i64>,
    pub plugin_type: PluginType,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl Placement {
    /// Category of child items if this placement is a news feed.
    pub fn feed_category(&self) -> Option<NewsCategory> {
        match self.plugin_type.child_type() {
            Some(PluginType::NewsItem(c)) => Some(c),
            _ => None,
        }
    }
}

/// A news item placed through the CMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItemPlugin {
    pub placement_id: i64,
    pub category: NewsCategory,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub published_date: DateTime<Utc>,
}

/// A child placement as enumerated by the CMS.
#[derive(Debug, Clone)]
pub enum PluginInstance {
    NewsItem(NewsItemPlugin),
    Other(Placement),
}

/// Request body for placing a new feed into a placeholder.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeedRequest {
    pub category: NewsCategory,
}

/// Placeholder path parameter.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlaceholderSlot {
    #[validate(custom(function = "validate_slot_name"))]
    pub slot: String,
}

/// Request body for adding a news item to a feed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddFeedItemRequest {
    #[serde(default)]
    #[validate(
        length(max = 200, message = "Title must be at most 200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub content: String,
}

/// A rendered news feed: the feed plus its ordered items.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedFeed {
    pub id: i64,
    pub placeholder: String,
    pub name: String,
    pub category: NewsCategory,
    pub news_items: Vec<NewsItemPlugin>,
}

/// A rendered top-level placement in a placeholder.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedPlacement {
    Feed(RenderedFeed),
    NewsItem(NewsItemPlugin),
    Other {
        id: i64,
        plugin_type: PluginType,
    },
}

/// All placements of a placeholder slot, in position order.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPlaceholder {
    pub placeholder: String,
    pub placements: Vec<RenderedPlacement>,
}
