//! Outbound service integrations.

pub mod resource_client;

pub use resource_client::{ResourceClient, ResourceFetchError};
