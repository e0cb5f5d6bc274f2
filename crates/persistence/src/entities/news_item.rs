//! News item entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{NewsCategory, NewsItem};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for news_category that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "news_category", rename_all = "snake_case")]
pub enum NewsCategoryDb {
    SystemStatus,
    Integration,
    Resource,
    Access,
}

impl From<NewsCategoryDb> for NewsCategory {
    fn from(db: NewsCategoryDb) -> Self {
        match db {
            NewsCategoryDb::SystemStatus => NewsCategory::SystemStatus,
            NewsCategoryDb::Integration => NewsCategory::Integration,
            NewsCategoryDb::Resource => NewsCategory::Resource,
            NewsCategoryDb::Access => NewsCategory::Access,
        }
    }
}

impl From<NewsCategory> for NewsCategoryDb {
    fn from(category: NewsCategory) -> Self {
        match category {
            NewsCategory::SystemStatus => NewsCategoryDb::SystemStatus,
            NewsCategory::Integration => NewsCategoryDb::Integration,
            NewsCategory::Resource => NewsCategoryDb::Resource,
            NewsCategory::Access => NewsCategoryDb::Access,
        }
    }
}

/// Database row mapping for the news_items table.
#[derive(Debug, Clone, FromRow)]
pub struct NewsItemEntity {
    pub id: i64,
    pub category: NewsCategoryDb,
    pub title: String,
    pub content: String,
    pub news_type: Option<String>,
    pub affected_element: Option<String>,
    pub external_url: Option<String>,
    pub effective_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub author_id: Uuid,
    pub author_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NewsItemEntity> for NewsItem {
    fn from(entity: NewsItemEntity) -> Self {
        Self {
            id: entity.id,
            category: entity.category.into(),
            title: entity.title,
            content: entity.content,
            news_type: entity.news_type,
            affected_element: entity.affected_element,
            external_url: entity.external_url,
            effective_date: entity.effective_date,
            expiration_date: entity.expiration_date,
            author_id: entity.author_id,
            author_name: entity.author_name,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
