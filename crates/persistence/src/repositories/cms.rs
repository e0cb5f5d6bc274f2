//! CMS placement repository for database operations.

use domain::models::{NewsCategory, Placement, PluginType};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::entities::{
    NewsCategoryDb, NewsItemPluginEntity, PlacementEntity, PlacementWithPluginEntity,
};
use crate::metrics::QueryTimer;
use crate::repositories::news_item::Author;

const PLACEMENT_WITH_PLUGIN: &str = r#"
    SELECT p.id, p.placeholder, p.parent_id, p.plugin_type, p.position, p.created_at,
           n.category AS item_category,
           n.title AS item_title,
           n.content AS item_content,
           n.author_id AS item_author_id,
           n.author_name AS item_author_name,
           n.published_date AS item_published_date
    FROM cms_placements p
    LEFT JOIN cms_news_item_plugins n ON n.placement_id = p.id
"#;

/// Repository for the CMS placement tree.
#[derive(Clone)]
pub struct CmsRepository {
    pool: PgPool,
}

impl CmsRepository {
    /// Creates a new CmsRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a placement of any plugin type to a placeholder or container.
    pub async fn insert_placement(
        &self,
        placeholder: &str,
        parent_id: Option<i64>,
        plugin_type: &PluginType,
    ) -> Result<PlacementEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_cms_placement");
        let result = insert_placement_with(&self.pool, placeholder, parent_id, plugin_type).await;
        timer.record();
        result
    }

    /// Append a news feed for `category` to the end of a placeholder.
    pub async fn create_feed(
        &self,
        placeholder: &str,
        category: NewsCategory,
    ) -> Result<PlacementEntity, sqlx::Error> {
        self.insert_placement(placeholder, None, &PluginType::NewsFeed(category))
            .await
    }

    /// Find a placement by id.
    pub async fn find_placement(&self, id: i64) -> Result<Option<PlacementEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_cms_placement");
        let result = sqlx::query_as::<_, PlacementEntity>(
            r#"
            SELECT * FROM cms_placements WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Top-level placements of a placeholder in position order.
    pub async fn top_level(
        &self,
        placeholder: &str,
    ) -> Result<Vec<PlacementWithPluginEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_cms_top_level");
        let sql = format!(
            "{} WHERE p.placeholder = $1 AND p.parent_id IS NULL ORDER BY p.position, p.id",
            PLACEMENT_WITH_PLUGIN
        );
        let result = sqlx::query_as::<_, PlacementWithPluginEntity>(&sql)
            .bind(placeholder)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Direct children of a container in position order.
    pub async fn children(
        &self,
        parent_id: i64,
    ) -> Result<Vec<PlacementWithPluginEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_cms_children");
        let sql = format!(
            "{} WHERE p.parent_id = $1 ORDER BY p.position, p.id",
            PLACEMENT_WITH_PLUGIN
        );
        let result = sqlx::query_as::<_, PlacementWithPluginEntity>(&sql)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Add a news item plugin under a feed.
    ///
    /// The placement row and its payload are written in one transaction.
    pub async fn add_news_item(
        &self,
        feed: &Placement,
        category: NewsCategory,
        title: &str,
        content: &str,
        author: Author<'_>,
    ) -> Result<NewsItemPluginEntity, sqlx::Error> {
        let timer = QueryTimer::new("add_cms_news_item");
        let mut tx = self.pool.begin().await?;

        let placement = insert_placement_with(
            &mut *tx,
            &feed.placeholder,
            Some(feed.id),
            &PluginType::NewsItem(category),
        )
        .await?;

        let item = sqlx::query_as::<_, NewsItemPluginEntity>(
            r#"
            INSERT INTO cms_news_item_plugins (
                placement_id, category, title, content, author_id, author_name
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(placement.id)
        .bind(NewsCategoryDb::from(category))
        .bind(title)
        .bind(content)
        .bind(author.id)
        .bind(author.name)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(item)
    }

    /// Find a news item plugin by its placement id.
    pub async fn find_news_item(
        &self,
        placement_id: i64,
    ) -> Result<Option<NewsItemPluginEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_cms_news_item");
        let result = sqlx::query_as::<_, NewsItemPluginEntity>(
            r#"
            SELECT * FROM cms_news_item_plugins WHERE placement_id = $1
            "#,
        )
        .bind(placement_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}

async fn insert_placement_with<'e, E>(
    executor: E,
    placeholder: &str,
    parent_id: Option<i64>,
    plugin_type: &PluginType,
) -> Result<PlacementEntity, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, PlacementEntity>(
        r#"
        INSERT INTO cms_placements (placeholder, parent_id, plugin_type, position)
        VALUES (
            $1, $2, $3,
            (SELECT COALESCE(MAX(position) + 1, 0) FROM cms_placements
             WHERE placeholder = $1 AND parent_id IS NOT DISTINCT FROM $2)
        )
        RETURNING *
        "#,
    )
    .bind(placeholder)
    .bind(parent_id)
    .bind(plugin_type.to_string())
    .fetch_one(executor)
    .await
}
