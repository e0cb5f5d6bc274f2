//! HTTP route handlers.

pub mod cms;
pub mod health;
pub mod news;
pub mod portal;
pub mod resources;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// `302 Found` to `location`.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
