//! CMS plugin endpoints: news feeds placed into placeholder slots.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use domain::models::{
    AddFeedItemRequest, CreateFeedRequest, NewsItemPlugin, Placement, PlaceholderSlot,
    PluginInstance, Principal, RenderedFeed, RenderedPlaceholder, RenderedPlacement,
};
use domain::services::render_feed;
use persistence::repositories::{Author, CmsRepository};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

pub fn router(state: &AppState) -> Router<AppState> {
    let base = state.config.portal.cms_path();
    Router::new()
        .route(
            &format!("{}/placeholders/:slot", base),
            get(render_placeholder),
        )
        .route(
            &format!("{}/placeholders/:slot/feeds", base),
            post(create_feed),
        )
        .route(&format!("{}/feeds/:id", base), get(get_feed))
        .route(&format!("{}/feeds/:id/items", base), post(add_feed_item))
        .route(&format!("{}/items/:id", base), get(get_item))
}

fn require_staff(state: &AppState, user: &Principal) -> Result<(), ApiError> {
    if user.is_staff {
        Ok(())
    } else {
        Err(ApiError::Unprivileged {
            location: state.config.portal.unprivileged_path(),
        })
    }
}

fn placement_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::NotFound("Placement not found".to_string()))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ApiError::validation(e.body_text()))
}

fn slot_name(slot: String) -> Result<String, ApiError> {
    let slot = PlaceholderSlot { slot };
    slot.validate()?;
    Ok(slot.slot)
}

async fn load_feed(repo: &CmsRepository, id: i64) -> Result<Placement, ApiError> {
    repo.find_placement(id)
        .await?
        .map(Placement::from)
        .filter(|p| p.feed_category().is_some())
        .ok_or_else(|| ApiError::NotFound("News feed not found".to_string()))
}

async fn rendered_feed(repo: &CmsRepository, feed: &Placement) -> Result<RenderedFeed, ApiError> {
    let children = repo
        .children(feed.id)
        .await?
        .into_iter()
        .map(PluginInstance::from)
        .collect();
    render_feed(feed, children)
        .ok_or_else(|| ApiError::NotFound("News feed not found".to_string()))
}

/// Places a new, empty news feed at the end of a placeholder.
pub async fn create_feed(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slot): Path<String>,
    payload: Result<Json<CreateFeedRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RenderedFeed>), ApiError> {
    require_staff(&state, &user)?;

    let slot = slot_name(slot)?;
    let request = json_body(payload)?;

    let repo = CmsRepository::new(state.pool.clone());
    let feed = Placement::from(repo.create_feed(&slot, request.category).await?);
    info!(feed_id = feed.id, placeholder = %slot, category = %request.category, "News feed placed");

    let rendered = rendered_feed(&repo, &feed).await?;
    Ok((StatusCode::CREATED, Json(rendered)))
}

/// Renders all top-level placements of a placeholder in position order.
pub async fn render_placeholder(
    State(state): State<AppState>,
    Path(slot): Path<String>,
) -> Result<Json<RenderedPlaceholder>, ApiError> {
    let slot = slot_name(slot)?;
    let repo = CmsRepository::new(state.pool.clone());

    let mut placements = Vec::new();
    for row in repo.top_level(&slot).await? {
        let rendered = match PluginInstance::from(row) {
            PluginInstance::NewsItem(item) => RenderedPlacement::NewsItem(item),
            PluginInstance::Other(placement) if placement.feed_category().is_some() => {
                RenderedPlacement::Feed(rendered_feed(&repo, &placement).await?)
            }
            PluginInstance::Other(placement) => RenderedPlacement::Other {
                id: placement.id,
                plugin_type: placement.plugin_type,
            },
        };
        placements.push(rendered);
    }

    Ok(Json(RenderedPlaceholder {
        placeholder: slot,
        placements,
    }))
}

/// A feed with its items, newest first.
pub async fn get_feed(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<RenderedFeed>, ApiError> {
    let id = placement_id(path)?;
    let repo = CmsRepository::new(state.pool.clone());
    let feed = load_feed(&repo, id).await?;
    Ok(Json(rendered_feed(&repo, &feed).await?))
}

/// Adds a news item plugin of the feed's category.
pub async fn add_feed_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<AddFeedItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<NewsItemPlugin>), ApiError> {
    require_staff(&state, &user)?;

    let id = placement_id(path)?;
    let repo = CmsRepository::new(state.pool.clone());
    let feed = load_feed(&repo, id).await?;

    let request = json_body(payload)?;
    request.validate()?;

    let category = feed
        .feed_category()
        .ok_or_else(|| ApiError::NotFound("News feed not found".to_string()))?;

    let item = repo
        .add_news_item(
            &feed,
            category,
            &request.title,
            &request.content,
            Author {
                id: user.user_id,
                name: &user.username,
            },
        )
        .await?;
    let item = NewsItemPlugin::from(item);

    info!(
        item_id = item.placement_id,
        feed_id = feed.id,
        author_id = %user.user_id,
        "News item plugin added"
    );

    Ok((StatusCode::CREATED, Json(item)))
}

/// A single news item plugin.
pub async fn get_item(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<NewsItemPlugin>, ApiError> {
    let id = placement_id(path)?;
    let repo = CmsRepository::new(state.pool.clone());
    repo.find_news_item(id)
        .await?
        .map(|item| Json(NewsItemPlugin::from(item)))
        .ok_or_else(|| ApiError::NotFound("News item not found".to_string()))
}
