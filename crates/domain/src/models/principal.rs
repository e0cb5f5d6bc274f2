//! Authenticated users and the authorization predicate for news writes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::{NewsAction, NewsCategory};

/// The user behind a request, as asserted by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub username: String,
    pub is_staff: bool,
    /// Permission codenames granted through group membership.
    pub permissions: Vec<String>,
}

impl Principal {
    /// Checks a codename, accepting both `add_x` and the app-qualified `app.add_x`.
    pub fn has_permission(&self, codename: &str) -> bool {
        self.permissions.iter().any(|p| {
            p == codename
                || p
                    .rsplit_once('.')
                    .map(|(_, bare)| bare == codename)
                    .unwrap_or(false)
        })
    }
}

/// How write access to a category is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessPolicy {
    /// Requires the per-model `add_*` / `change_*` permission.
    Permission,
    /// Requires the staff flag.
    Staff,
}

impl AccessPolicy {
    pub fn permits(&self, principal: &Principal, category: NewsCategory, action: NewsAction) -> bool {
        match self {
            AccessPolicy::Permission => {
                principal.has_permission(&category.permission_codename(action))
            }
            AccessPolicy::Staff => principal.is_staff,
        }
    }
}
