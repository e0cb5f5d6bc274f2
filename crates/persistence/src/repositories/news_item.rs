//! News item repository for database operations.

use domain::models::{NewsCategory, NewsFields};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{NewsCategoryDb, NewsItemEntity};
use crate::metrics::QueryTimer;

/// Author recorded on a new item.
#[derive(Debug, Clone, Copy)]
pub struct Author<'a> {
    pub id: Uuid,
    pub name: &'a str,
}

/// Repository for news item database operations.
#[derive(Clone)]
pub struct NewsItemRepository {
    pool: PgPool,
}

impl NewsItemRepository {
    /// Creates a new NewsItemRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active items of a category, newest first.
    pub async fn list_active(
        &self,
        category: NewsCategory,
    ) -> Result<Vec<NewsItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_news");
        let result = sqlx::query_as::<_, NewsItemEntity>(
            r#"
            SELECT * FROM news_items
            WHERE category = $1 AND is_active = TRUE
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(NewsCategoryDb::from(category))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an item by id within a category.
    pub async fn find(
        &self,
        category: NewsCategory,
        id: i64,
    ) -> Result<Option<NewsItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_news_item");
        let result = sqlx::query_as::<_, NewsItemEntity>(
            r#"
            SELECT * FROM news_items WHERE category = $1 AND id = $2
            "#,
        )
        .bind(NewsCategoryDb::from(category))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a new item.
    pub async fn create(
        &self,
        category: NewsCategory,
        fields: &NewsFields,
        author: Author<'_>,
        is_active: bool,
    ) -> Result<NewsItemEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_news_item");
        let result = sqlx::query_as::<_, NewsItemEntity>(
            r#"
            INSERT INTO news_items (
                category, title, content, news_type, affected_element, external_url,
                effective_date, expiration_date, author_id, author_name, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(NewsCategoryDb::from(category))
        .bind(&fields.title)
        .bind(&fields.content)
        .bind(&fields.news_type)
        .bind(&fields.affected_element)
        .bind(&fields.external_url)
        .bind(fields.effective_date)
        .bind(fields.expiration_date)
        .bind(author.id)
        .bind(author.name)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace the editable fields of an item.
    ///
    /// Author, `created_at` and `is_active` are left alone. `updated_at`
    /// moves forward by at least one microsecond even when two updates land
    /// within the same clock tick.
    pub async fn update(
        &self,
        category: NewsCategory,
        id: i64,
        fields: &NewsFields,
    ) -> Result<Option<NewsItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_news_item");
        let result = sqlx::query_as::<_, NewsItemEntity>(
            r#"
            UPDATE news_items
            SET title = $3,
                content = $4,
                news_type = $5,
                affected_element = $6,
                external_url = $7,
                effective_date = $8,
                expiration_date = $9,
                updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond')
            WHERE category = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(NewsCategoryDb::from(category))
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.content)
        .bind(&fields.news_type)
        .bind(&fields.affected_element)
        .bind(&fields.external_url)
        .bind(fields.effective_date)
        .bind(fields.expiration_date)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
