//! Authenticated user extractors.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::Principal;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::{bearer_token, principal_from_token};

/// The authenticated user of a guarded handler.
///
/// Rejects with a redirect to the login page, carrying the requested path
/// in `next`, when the request has no valid token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

/// The authenticated user, if any.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<Principal>);

fn principal_from_parts(parts: &Parts, state: &AppState) -> Option<Principal> {
    if let Some(principal) = parts.extensions.get::<Principal>() {
        return Some(principal.clone());
    }

    let token = parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)?;

    principal_from_token(&state.jwt, token)
        .map_err(|e| tracing::debug!("JWT validation failed: {}", e))
        .ok()
}

/// Builds `<login_url>?next=<path>`.
pub fn login_redirect(login_url: &str, next: &str) -> String {
    let separator = if login_url.contains('?') { '&' } else { '?' };
    format!("{}{}next={}", login_url, separator, urlencoding::encode(next))
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match principal_from_parts(parts, state) {
            Some(principal) => Ok(CurrentUser(principal)),
            None => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or_else(|| parts.uri.path());
                Err(ApiError::LoginRequired {
                    location: login_redirect(&state.config.auth.login_url, next),
                })
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(principal_from_parts(parts, state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect() {
        assert_eq!(
            login_redirect("/accounts/login/", "/ops/infrastructure-news/add/"),
            "/accounts/login/?next=%2Fops%2Finfrastructure-news%2Fadd%2F"
        );
    }

    #[test]
    fn test_login_redirect_encodes_query() {
        assert_eq!(
            login_redirect("https://idp.example.org/login?client=ops", "/ops/?a=1&b=2"),
            "https://idp.example.org/login?client=ops&next=%2Fops%2F%3Fa%3D1%26b%3D2"
        );
    }
}
