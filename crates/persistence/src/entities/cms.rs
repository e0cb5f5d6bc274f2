//! CMS placement entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::{NewsItemPlugin, Placement, PluginInstance, PluginType};
use sqlx::FromRow;
use uuid::Uuid;

use super::news_item::NewsCategoryDb;

/// Database row mapping for the cms_placements table.
#[derive(Debug, Clone, FromRow)]
pub struct PlacementEntity {
    pub id: i64,
    pub placeholder: String,
    pub parent_id: Option<i64>,
    pub plugin_type: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl From<PlacementEntity> for Placement {
    fn from(entity: PlacementEntity) -> Self {
        Self {
            id: entity.id,
            placeholder: entity.placeholder,
            parent_id: entity.parent_id,
            plugin_type: PluginType::parse(&entity.plugin_type),
            position: entity.position,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the cms_news_item_plugins table.
#[derive(Debug, Clone, FromRow)]
pub struct NewsItemPluginEntity {
    pub placement_id: i64,
    pub category: NewsCategoryDb,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub published_date: DateTime<Utc>,
}

impl From<NewsItemPluginEntity> for NewsItemPlugin {
    fn from(entity: NewsItemPluginEntity) -> Self {
        Self {
            placement_id: entity.placement_id,
            category: entity.category.into(),
            title: entity.title,
            content: entity.content,
            author_id: entity.author_id,
            author_name: entity.author_name,
            published_date: entity.published_date,
        }
    }
}

/// A placement left-joined with its news item payload, if it has one.
#[derive(Debug, Clone, FromRow)]
pub struct PlacementWithPluginEntity {
    pub id: i64,
    pub placeholder: String,
    pub parent_id: Option<i64>,
    pub plugin_type: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub item_category: Option<NewsCategoryDb>,
    pub item_title: Option<String>,
    pub item_content: Option<String>,
    pub item_author_id: Option<Uuid>,
    pub item_author_name: Option<String>,
    pub item_published_date: Option<DateTime<Utc>>,
}

impl From<PlacementWithPluginEntity> for PluginInstance {
    fn from(row: PlacementWithPluginEntity) -> Self {
        let is_item = matches!(PluginType::parse(&row.plugin_type), PluginType::NewsItem(_));
        match (
            is_item,
            row.item_category,
            row.item_title,
            row.item_content,
            row.item_author_id,
            row.item_author_name,
            row.item_published_date,
        ) {
            (
                true,
                Some(category),
                Some(title),
                Some(content),
                Some(author_id),
                Some(author_name),
                Some(published_date),
            ) => PluginInstance::NewsItem(NewsItemPlugin {
                placement_id: row.id,
                category: category.into(),
                title,
                content,
                author_id,
                author_name,
                published_date,
            }),
            _ => PluginInstance::Other(Placement {
                id: row.id,
                placeholder: row.placeholder,
                parent_id: row.parent_id,
                plugin_type: PluginType::parse(&row.plugin_type),
                position: row.position,
                created_at: row.created_at,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::NewsCategory;

    fn row(plugin_type: &str, with_payload: bool) -> PlacementWithPluginEntity {
        PlacementWithPluginEntity {
            id: 9,
            placeholder: "main".to_string(),
            parent_id: Some(1),
            plugin_type: plugin_type.to_string(),
            position: 2,
            created_at: Utc::now(),
            item_category: with_payload.then_some(NewsCategoryDb::Resource),
            item_title: with_payload.then(|| "Title".to_string()),
            item_content: with_payload.then(|| "Body".to_string()),
            item_author_id: with_payload.then_some(Uuid::nil()),
            item_author_name: with_payload.then(|| "editor".to_string()),
            item_published_date: with_payload.then(Utc::now),
        }
    }

    #[test]
    fn test_news_item_row_becomes_plugin() {
        match PluginInstance::from(row("resource_news_item", true)) {
            PluginInstance::NewsItem(item) => {
                assert_eq!(item.placement_id, 9);
                assert_eq!(item.category, NewsCategory::Resource);
            }
            other => panic!("expected news item, got {:?}", other),
        }
    }

    #[test]
    fn test_foreign_plugin_row_is_other() {
        match PluginInstance::from(row("TextPlugin", false)) {
            PluginInstance::Other(p) => {
                assert_eq!(p.plugin_type, PluginType::Other("TextPlugin".to_string()));
            }
            other => panic!("expected other plugin, got {:?}", other),
        }
    }

    #[test]
    fn test_item_row_without_payload_is_other() {
        assert!(matches!(
            PluginInstance::from(row("resource_news_item", false)),
            PluginInstance::Other(_)
        ));
    }
}
