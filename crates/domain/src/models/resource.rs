//! ACCESS allocated resources page.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Bucket for resources without a usable organization name.
pub const UNKNOWN_ORGANIZATION: &str = "Unknown Organization";

/// Resources keyed by organization name, keys in ascending order.
pub type ResourcesByOrganization = BTreeMap<String, Vec<Value>>;

/// Context of the allocated resources page.
#[derive(Debug, Clone, Serialize)]
pub struct AllocatedResourcesPage {
    pub page: &'static str,
    pub resources_by_org: ResourcesByOrganization,
    pub error_message: Option<String>,
}

impl AllocatedResourcesPage {
    const PAGE: &'static str = "access_allocated";

    pub fn loaded(resources_by_org: ResourcesByOrganization) -> Self {
        Self {
            page: Self::PAGE,
            resources_by_org,
            error_message: None,
        }
    }

    /// A failed fetch shows the message and no partial data.
    pub fn failed(error_message: impl Into<String>) -> Self {
        Self {
            page: Self::PAGE,
            resources_by_org: BTreeMap::new(),
            error_message: Some(error_message.into()),
        }
    }
}
