//! News categories.
//!
//! Every news category shares the same CRUD shape; what differs is captured
//! here: URL slug, permission codenames, extra form fields and the default
//! access policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::principal::AccessPolicy;

/// A news category exposed by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsCategory {
    /// System and infrastructure status: maintenance, outages.
    SystemStatus,
    /// Integrations, roadmaps, new services.
    Integration,
    /// Resources and allocations.
    Resource,
    /// General ACCESS announcements, events, achievements.
    Access,
}

/// Write actions guarded by permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsAction {
    Add,
    Change,
}

impl NewsAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsAction::Add => "add",
            NewsAction::Change => "change",
        }
    }
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 4] = [
        NewsCategory::SystemStatus,
        NewsCategory::Integration,
        NewsCategory::Resource,
        NewsCategory::Access,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::SystemStatus => "system_status",
            NewsCategory::Integration => "integration",
            NewsCategory::Resource => "resource",
            NewsCategory::Access => "access",
        }
    }

    /// URL segment; routes live under `/<prefix>/<slug>-news/`.
    pub fn slug(&self) -> &'static str {
        match self {
            NewsCategory::SystemStatus => "infrastructure",
            NewsCategory::Integration => "integration",
            NewsCategory::Resource => "resource",
            NewsCategory::Access => "access",
        }
    }

    /// Lowercase model name used in permission codenames.
    pub fn model_name(&self) -> &'static str {
        match self {
            NewsCategory::SystemStatus => "systemstatusnews",
            NewsCategory::Integration => "integrationnews",
            NewsCategory::Resource => "resourcenews",
            NewsCategory::Access => "accessnews",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            NewsCategory::SystemStatus => "System and Infrastructure Status News",
            NewsCategory::Integration => "Integration News",
            NewsCategory::Resource => "Resource News",
            NewsCategory::Access => "ACCESS News",
        }
    }

    /// Short label used for CMS plugin names.
    pub fn short_name(&self) -> &'static str {
        match self {
            NewsCategory::SystemStatus => "System Status",
            NewsCategory::Integration => "Integration",
            NewsCategory::Resource => "Resource",
            NewsCategory::Access => "ACCESS",
        }
    }

    /// Page identifier handed to clients for navigation highlighting.
    pub fn page(&self) -> String {
        format!("{}_news", self.as_str())
    }

    pub fn default_policy(&self) -> AccessPolicy {
        match self {
            NewsCategory::SystemStatus | NewsCategory::Integration => AccessPolicy::Permission,
            NewsCategory::Resource | NewsCategory::Access => AccessPolicy::Staff,
        }
    }

    /// Permission codename required for `action`, e.g. `add_integrationnews`.
    pub fn permission_codename(&self, action: NewsAction) -> String {
        format!("{}_{}", action.as_str(), self.model_name())
    }

    pub fn success_message(&self, action: NewsAction) -> String {
        let subject = match self {
            NewsCategory::SystemStatus => "System and infrastructure status news",
            NewsCategory::Integration => "Integration news",
            NewsCategory::Resource => "Resource news",
            NewsCategory::Access => "ACCESS news",
        };
        let verb = match action {
            NewsAction::Add => "added",
            NewsAction::Change => "updated",
        };
        format!("{} {} successfully!", subject, verb)
    }
}

impl FromStr for NewsCategory {
    type Err = String;

    /// Accepts either the stored name (`system_status`) or the URL slug (`infrastructure`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        NewsCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered || c.slug() == lowered)
            .ok_or_else(|| format!("Invalid news category: {}", s))
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
