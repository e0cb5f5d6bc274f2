//! Bearer token authentication middleware.
//!
//! Tokens come from the external identity provider. A valid token puts the
//! [`Principal`] into request extensions; requests without one pass through
//! unchanged and are turned away by the extractors of guarded handlers.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use domain::models::Principal;
use shared::jwt::{extract_user_id, JwtConfig};

use crate::app::AppState;

/// Returns the token of a `Bearer` authorization header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Validates an access token and builds the principal it describes.
pub fn principal_from_token(jwt: &JwtConfig, token: &str) -> Result<Principal, String> {
    let claims = jwt
        .validate_token(token)
        .map_err(|e| format!("Invalid token: {}", e))?;
    let user_id = extract_user_id(&claims).map_err(|_| "Invalid user ID in token".to_string())?;

    Ok(Principal {
        user_id,
        username: claims.username,
        is_staff: claims.is_staff,
        permissions: claims.permissions,
    })
}

/// Middleware that authenticates the request if it carries a valid token.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_string);

    if let Some(token) = token {
        match principal_from_token(&state.jwt, &token) {
            Ok(principal) => {
                req.extensions_mut().insert(principal);
            }
            Err(e) => tracing::debug!("JWT validation failed: {}", e),
        }
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::jwt::TokenSubject;
    use uuid::Uuid;

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("bearer abc"), None);
    }

    #[test]
    fn test_principal_from_token_rejects_garbage() {
        let jwt = JwtConfig::with_leeway("", TEST_PUBLIC_KEY, 3600, 0).unwrap();
        assert!(principal_from_token(&jwt, "not-a-token").is_err());
    }

    #[test]
    fn test_principal_from_token() {
        let jwt = JwtConfig::with_leeway(TEST_PRIVATE_KEY, TEST_PUBLIC_KEY, 3600, 0).unwrap();
        let user_id = Uuid::new_v4();
        let (token, _) = jwt
            .generate_access_token(&TokenSubject {
                user_id,
                username: "jdoe".to_string(),
                is_staff: true,
                permissions: vec!["add_integrationnews".to_string()],
            })
            .unwrap();

        let principal = principal_from_token(&jwt, &token).unwrap();
        assert_eq!(principal.user_id, user_id);
        assert_eq!(principal.username, "jdoe");
        assert!(principal.is_staff);
        assert!(principal.has_permission("add_integrationnews"));
    }

    pub(crate) const TEST_PRIVATE_KEY: &str = include_str!("../../tests/fixtures/test_private_key.pem");
    pub(crate) const TEST_PUBLIC_KEY: &str = include_str!("../../tests/fixtures/test_public_key.pem");
}
