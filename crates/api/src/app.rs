use axum::{middleware, routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use shared::jwt::{JwtConfig, JwtError};

use crate::config::Config;
use crate::middleware::{
    authenticate, cache_page, metrics_handler, metrics_middleware, security_headers_middleware,
    trace_id, ResponseCache,
};
use crate::routes::{cms, health, news, portal, resources};
use crate::services::{ResourceClient, ResourceFetchError};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub resource_client: Arc<ResourceClient>,
    pub response_cache: Arc<ResponseCache>,
}

/// Errors building the application from configuration.
#[derive(Debug, thiserror::Error)]
pub enum AppBuildError {
    #[error("Failed to initialize JWT config: {0}")]
    Jwt(#[from] JwtError),

    #[error("Failed to initialize resource client: {0}")]
    ResourceClient(#[from] ResourceFetchError),
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Result<Self, AppBuildError> {
        let jwt = JwtConfig::with_leeway(
            &config.auth.private_key,
            &config.auth.public_key,
            config.auth.access_token_expiry_secs,
            config.auth.leeway_secs,
        )?;
        let resource_client = ResourceClient::new(&config.resources)?;
        let response_cache =
            ResponseCache::new(Duration::from_secs(config.resources.cache_ttl_secs));

        Ok(Self {
            pool,
            config: Arc::new(config),
            jwt: Arc::new(jwt),
            resource_client: Arc::new(resource_client),
            response_cache: Arc::new(response_cache),
        })
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Result<Router, AppBuildError> {
    let state = AppState::new(config, pool)?;
    Ok(build_router(state))
}

pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();
    let portal = &config.portal;

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Resources page is public and served from the response cache
    let resource_routes = Router::new()
        .route(&portal.resources_path(), get(resources::access_allocated))
        .route_layer(middleware::from_fn_with_state(
            state.response_cache.clone(),
            cache_page,
        ));

    let portal_routes = Router::new()
        .route("/", get(portal::root_redirect))
        .route(&portal.base_path(), get(portal::index))
        .route(&portal.unprivileged_path(), get(portal::unprivileged))
        .merge(news::router(&state))
        .merge(cms::router(&state))
        .merge(resource_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(portal_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
