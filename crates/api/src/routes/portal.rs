//! Portal landing pages.

use axum::{extract::State, response::Response, Json};
use domain::models::{NewsAction, NewsCategory};
use serde::Serialize;

use crate::app::AppState;
use crate::extractors::OptionalUser;
use crate::routes::found;

#[derive(Debug, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: String,
}

/// One enabled news category as listed on the landing page.
#[derive(Debug, Serialize)]
pub struct CategoryLink {
    pub category: NewsCategory,
    pub label: &'static str,
    pub href: String,
    /// Whether the current user may add items; false when anonymous.
    pub can_add: bool,
}

#[derive(Debug, Serialize)]
pub struct LandingPage {
    pub page: &'static str,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub news: Vec<CategoryLink>,
    pub links: Vec<NavLink>,
}

#[derive(Debug, Serialize)]
pub struct UnprivilegedPage {
    pub page: &'static str,
    pub message: &'static str,
    pub home: String,
}

/// `GET /` sends visitors to the portal.
pub async fn root_redirect(State(state): State<AppState>) -> Response {
    found(&state.config.portal.base_path())
}

/// Portal landing page.
pub async fn index(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Json<LandingPage> {
    let portal = &state.config.portal;

    let news = portal
        .categories
        .iter()
        .map(|&category| CategoryLink {
            category,
            label: category.display_name(),
            href: portal.news_path(category),
            can_add: user.as_ref().is_some_and(|u| {
                portal
                    .policy_for(category)
                    .permits(u, category, NewsAction::Add)
            }),
        })
        .collect();

    Json(LandingPage {
        page: "index",
        title: portal.title.clone(),
        username: user.map(|u| u.username),
        news,
        links: vec![NavLink {
            label: "ACCESS Allocated Resources",
            href: portal.resources_path(),
        }],
    })
}

/// Where users are sent when a write is not permitted.
pub async fn unprivileged(State(state): State<AppState>) -> Json<UnprivilegedPage> {
    Json(UnprivilegedPage {
        page: "unprivileged",
        message: "You do not have permission to access this page.",
        home: state.config.portal.base_path(),
    })
}
