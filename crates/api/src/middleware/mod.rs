//! HTTP middleware components.

pub mod logging;
pub mod metrics;
pub mod response_cache;
pub mod security_headers;
pub mod trace_id;
pub mod user_auth;

pub use metrics::{init_metrics, metrics_handler, metrics_middleware};
pub use response_cache::{cache_page, ResponseCache};
pub use security_headers::security_headers_middleware;
pub use trace_id::{trace_id, RequestId, REQUEST_ID_HEADER};
pub use user_auth::authenticate;
