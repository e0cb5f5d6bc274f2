//! Grouping of ACCESS allocated resources by organization.

use serde_json::Value;

use crate::models::resource::{ResourcesByOrganization, UNKNOWN_ORGANIZATION};

/// Organization bucket for one resource entry.
///
/// Missing, non-string, empty or whitespace-only names fall into the
/// unknown bucket; anything else is used verbatim.
pub fn organization_key(resource: &Value) -> String {
    match resource.get("organization_name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => UNKNOWN_ORGANIZATION.to_string(),
    }
}

/// Groups resources by organization. Keys come out in ascending order and
/// each bucket keeps the input order of its entries.
pub fn group_by_organization(results: Vec<Value>) -> ResourcesByOrganization {
    let mut grouped = ResourcesByOrganization::new();
    for resource in results {
        grouped
            .entry(organization_key(&resource))
            .or_default()
            .push(resource);
    }
    grouped
}

/// Pulls the `results` array out of an API document.
///
/// A missing `results` key is an empty result set. A document that is not
/// an object, or a `results` value that is not an array, is rejected.
pub fn extract_results(document: Value) -> Result<Vec<Value>, String> {
    let Value::Object(mut map) = document else {
        return Err("expected a JSON object at the top level".to_string());
    };
    match map.remove("results") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(results)) => Ok(results),
        Some(_) => Err("expected \"results\" to be an array".to_string()),
    }
}
