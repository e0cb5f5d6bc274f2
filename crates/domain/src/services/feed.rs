//! News feed aggregation for CMS feed placements.

use crate::models::category::NewsCategory;
use crate::models::cms::{NewsItemPlugin, Placement, PluginInstance, PluginType, RenderedFeed};

/// Orders the children of a feed for display.
///
/// Keeps only news items of `category` and sorts them newest first by
/// `published_date`. The sort is stable, so items published at the same
/// instant keep their enumeration order.
pub fn order_feed(category: NewsCategory, children: Vec<PluginInstance>) -> Vec<NewsItemPlugin> {
    let mut items: Vec<NewsItemPlugin> = children
        .into_iter()
        .filter_map(|child| match child {
            PluginInstance::NewsItem(item) if item.category == category => Some(item),
            _ => None,
        })
        .collect();
    items.sort_by(|a, b| b.published_date.cmp(&a.published_date));
    items
}

/// Renders a feed placement with its ordered items.
///
/// Returns `None` when the placement is not a news feed.
pub fn render_feed(feed: &Placement, children: Vec<PluginInstance>) -> Option<RenderedFeed> {
    let category = feed.feed_category()?;
    Some(RenderedFeed {
        id: feed.id,
        placeholder: feed.placeholder.clone(),
        name: PluginType::NewsFeed(category).name(),
        category,
        news_items: order_feed(category, children),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    fn item(id: i64, category: NewsCategory, minutes: i64) -> PluginInstance {
        PluginInstance::NewsItem(NewsItemPlugin {
            placement_id: id,
            category,
            title: format!("item {}", id),
            content: "body".to_string(),
            author_id: Uuid::nil(),
            author_name: "editor".to_string(),
            published_date: base_time() + Duration::minutes(minutes),
        })
    }

    fn other(id: i64, plugin_type: &str) -> PluginInstance {
        PluginInstance::Other(Placement {
            id,
            placeholder: "main".to_string(),
            parent_id: Some(1),
            plugin_type: PluginType::parse(plugin_type),
            position: 0,
            created_at: base_time(),
        })
    }

    fn ids(items: &[NewsItemPlugin]) -> Vec<i64> {
        items.iter().map(|i| i.placement_id).collect()
    }

    #[test]
    fn test_orders_newest_first() {
        let children = vec![
            item(10, NewsCategory::SystemStatus, 5),
            item(11, NewsCategory::SystemStatus, 30),
            item(12, NewsCategory::SystemStatus, -10),
        ];
        let ordered = order_feed(NewsCategory::SystemStatus, children);
        assert_eq!(ids(&ordered), vec![11, 10, 12]);
    }

    #[test]
    fn test_filters_other_categories_and_plugins() {
        let children = vec![
            item(10, NewsCategory::SystemStatus, 1),
            item(11, NewsCategory::Integration, 99),
            other(12, "TextPlugin"),
            other(13, "system_status_news_feed"),
            item(14, NewsCategory::SystemStatus, 2),
        ];
        let ordered = order_feed(NewsCategory::SystemStatus, children);
        assert_eq!(ids(&ordered), vec![14, 10]);
        assert!(ordered
            .iter()
            .all(|i| i.category == NewsCategory::SystemStatus));
    }

    #[test]
    fn test_ties_keep_enumeration_order() {
        let children = vec![
            item(1, NewsCategory::Access, 0),
            item(2, NewsCategory::Access, 10),
            item(3, NewsCategory::Access, 0),
            item(4, NewsCategory::Access, 0),
        ];
        let ordered = order_feed(NewsCategory::Access, children);
        assert_eq!(ids(&ordered), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_empty_children() {
        assert!(order_feed(NewsCategory::Resource, Vec::new()).is_empty());
    }

    #[test]
    fn test_only_foreign_children_yield_empty_feed() {
        let children = vec![other(5, "TextPlugin"), item(6, NewsCategory::Resource, 0)];
        assert!(order_feed(NewsCategory::Integration, children).is_empty());
    }

    #[test]
    fn test_result_is_sorted_for_many_inputs() {
        let children: Vec<_> = (0..50)
            .map(|i| item(i, NewsCategory::Integration, (i * 37) % 23))
            .collect();
        let ordered = order_feed(NewsCategory::Integration, children);
        assert_eq!(ordered.len(), 50);
        assert!(ordered
            .windows(2)
            .all(|w| w[0].published_date >= w[1].published_date));
    }

    #[test]
    fn test_render_feed() {
        let feed = Placement {
            id: 1,
            placeholder: "main".to_string(),
            parent_id: None,
            plugin_type: PluginType::NewsFeed(NewsCategory::Integration),
            position: 0,
            created_at: base_time(),
        };
        let rendered = render_feed(
            &feed,
            vec![
                item(2, NewsCategory::Integration, 0),
                item(3, NewsCategory::Integration, 1),
            ],
        )
        .unwrap();
        assert_eq!(rendered.name, "Integration News Feed");
        assert_eq!(ids(&rendered.news_items), vec![3, 2]);
    }

    #[test]
    fn test_render_feed_rejects_non_feed() {
        let not_feed = Placement {
            id: 1,
            placeholder: "main".to_string(),
            parent_id: None,
            plugin_type: PluginType::Other("TextPlugin".to_string()),
            position: 0,
            created_at: base_time(),
        };
        assert!(render_feed(&not_feed, Vec::new()).is_none());
    }
}
