//! News category list and add/update form handlers.
//!
//! Every enabled category gets the same five routes under
//! `/<prefix>/<slug>-news/`; the category reaches the handlers as a request
//! extension.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use domain::models::{
    NewsAction, NewsCategory, NewsForm, NewsFormDescriptor, NewsFormPage, NewsItem, NewsListPage,
    NewsSaved, Principal,
};
use persistence::repositories::{Author, NewsItemRepository};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// Routes for all enabled categories.
pub fn router(state: &AppState) -> Router<AppState> {
    let portal = &state.config.portal;
    portal
        .categories
        .iter()
        .fold(Router::new(), |router, &category| {
            let base = portal.news_path(category);
            let category_routes = Router::new()
                .route(&base, get(list_news))
                .route(&format!("{}add/", base), get(add_form).post(create_news))
                .route(
                    &format!("{}update/:id/", base),
                    get(edit_form).post(update_news),
                )
                .layer(Extension(category));
            router.merge(category_routes)
        })
}

/// Rejects users the category's policy does not permit.
fn authorize(
    state: &AppState,
    user: &Principal,
    category: NewsCategory,
    action: NewsAction,
) -> Result<(), ApiError> {
    let portal = &state.config.portal;
    if portal.policy_for(category).permits(user, category, action) {
        Ok(())
    } else {
        info!(
            user_id = %user.user_id,
            category = %category,
            action = action.as_str(),
            "News write denied"
        );
        Err(ApiError::Unprivileged {
            location: portal.unprivileged_path(),
        })
    }
}

fn news_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::NotFound("News item not found".to_string()))
}

fn form_body(payload: Result<Json<NewsForm>, JsonRejection>) -> Result<NewsForm, ApiError> {
    payload
        .map(|Json(form)| form)
        .map_err(|e| ApiError::validation(e.body_text()))
}

async fn find_item(
    repo: &NewsItemRepository,
    category: NewsCategory,
    id: i64,
) -> Result<NewsItem, ApiError> {
    repo.find(category, id)
        .await?
        .map(NewsItem::from)
        .ok_or_else(|| ApiError::NotFound("News item not found".to_string()))
}

/// Active items of the category, newest first.
pub async fn list_news(
    State(state): State<AppState>,
    Extension(category): Extension<NewsCategory>,
) -> Result<Json<NewsListPage>, ApiError> {
    let repo = NewsItemRepository::new(state.pool.clone());
    let news = repo
        .list_active(category)
        .await?
        .into_iter()
        .map(NewsItem::from)
        .collect();

    Ok(Json(NewsListPage {
        page: category.page(),
        category,
        title: category.display_name(),
        news,
    }))
}

/// Empty add form.
pub async fn add_form(
    State(state): State<AppState>,
    Extension(category): Extension<NewsCategory>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<NewsFormPage>, ApiError> {
    authorize(&state, &user, category, NewsAction::Add)?;

    Ok(Json(NewsFormPage {
        page: category.page(),
        news: None,
        form: NewsFormDescriptor::blank(category),
    }))
}

/// Validates and stores a new item authored by the current user.
pub async fn create_news(
    State(state): State<AppState>,
    Extension(category): Extension<NewsCategory>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<NewsForm>, JsonRejection>,
) -> Result<(StatusCode, Json<NewsSaved>), ApiError> {
    authorize(&state, &user, category, NewsAction::Add)?;

    let form = form_body(payload)?;
    let is_active = form.is_active.unwrap_or(true);
    let fields = form.clean(category)?;

    let repo = NewsItemRepository::new(state.pool.clone());
    let entity = repo
        .create(
            category,
            &fields,
            Author {
                id: user.user_id,
                name: &user.username,
            },
            is_active,
        )
        .await?;
    let news = NewsItem::from(entity);

    info!(
        news_id = news.id,
        category = %category,
        author_id = %user.user_id,
        "News item created"
    );

    Ok((
        StatusCode::CREATED,
        Json(NewsSaved {
            message: category.success_message(NewsAction::Add),
            news,
        }),
    ))
}

/// Existing item with a prefilled update form.
pub async fn edit_form(
    State(state): State<AppState>,
    Extension(category): Extension<NewsCategory>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<NewsFormPage>, ApiError> {
    authorize(&state, &user, category, NewsAction::Change)?;

    let id = news_id(path)?;
    let repo = NewsItemRepository::new(state.pool.clone());
    let news = find_item(&repo, category, id).await?;

    Ok(Json(NewsFormPage {
        page: category.page(),
        form: NewsFormDescriptor::for_item(&news),
        news: Some(news),
    }))
}

/// Replaces the editable fields of an item.
pub async fn update_news(
    State(state): State<AppState>,
    Extension(category): Extension<NewsCategory>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<NewsForm>, JsonRejection>,
) -> Result<Json<NewsSaved>, ApiError> {
    authorize(&state, &user, category, NewsAction::Change)?;

    let id = news_id(path)?;
    let repo = NewsItemRepository::new(state.pool.clone());
    find_item(&repo, category, id).await?;

    let fields = form_body(payload)?.clean(category)?;
    let news = repo
        .update(category, id, &fields)
        .await?
        .map(NewsItem::from)
        .ok_or_else(|| ApiError::NotFound("News item not found".to_string()))?;

    info!(
        news_id = news.id,
        category = %category,
        user_id = %user.user_id,
        "News item updated"
    );

    Ok(Json(NewsSaved {
        message: category.success_message(NewsAction::Change),
        news,
    }))
}
