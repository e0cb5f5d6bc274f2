//! Whole-response cache for idempotent pages.
//!
//! Successful `GET` responses are buffered and replayed for the configured
//! TTL, keyed by path and query. There is no invalidation; entries simply
//! expire.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::middleware::metrics::record_cache_lookup;

#[derive(Clone)]
struct CachedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    stored_at: Instant,
}

impl CachedResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        *response.headers_mut() = self.headers;
        response
    }
}

/// In-process response cache shared by all requests.
pub struct ResponseCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CachedResponse>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    async fn get(&self, key: &str) -> Option<Response> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .cloned()
            .map(CachedResponse::into_response)
    }

    async fn put(&self, key: String, entry: CachedResponse) {
        let mut entries = self.entries.write().await;
        let ttl = self.ttl;
        entries.retain(|_, e| e.stored_at.elapsed() < ttl);
        entries.insert(key, entry);
    }

    /// Number of stored entries, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn cache_key(req: &Request<Body>) -> String {
    req.uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string())
}

/// Middleware serving cached responses and storing fresh successful ones.
pub async fn cache_page(
    State(cache): State<Arc<ResponseCache>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    let key = cache_key(&req);
    if let Some(cached) = cache.get(&key).await {
        record_cache_lookup("hit");
        tracing::debug!(key = %key, "Response served from cache");
        return cached;
    }
    record_cache_lookup("miss");

    let response = next.run(req).await;
    if !response.status().is_success() {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return ApiError::Internal(format!("Failed to buffer response: {}", e))
                .into_response();
        }
    };

    cache
        .put(
            key,
            CachedResponse {
                status: parts.status,
                headers: parts.headers.clone(),
                body: bytes.clone(),
                stored_at: Instant::now(),
            },
        )
        .await;
    record_cache_lookup("store");

    Response::from_parts(parts, Body::from(bytes))
}
