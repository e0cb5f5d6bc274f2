//! ACCESS allocated resources page.

use axum::{extract::State, Extension, Json};
use domain::models::AllocatedResourcesPage;
use domain::services::group_by_organization;
use tracing::warn;

use crate::app::AppState;
use crate::middleware::RequestId;

/// Active resources grouped by organization.
///
/// Upstream failures are rendered into `error_message`; the page itself
/// always succeeds.
pub async fn access_allocated(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
) -> Json<AllocatedResourcesPage> {
    let page = match state.resource_client.fetch_active().await {
        Ok(results) => AllocatedResourcesPage::loaded(group_by_organization(results)),
        Err(e) => {
            warn!(
                request_id = request_id.as_ref().map(|Extension(id)| id.0.as_str()).unwrap_or("unknown"),
                error = %e,
                "Showing resources page without data"
            );
            AllocatedResourcesPage::failed(e.to_string())
        }
    };
    Json(page)
}
