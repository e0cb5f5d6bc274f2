//! Domain services for the Operations Portal.
//!
//! Services contain logic that operates on domain models without touching
//! storage or the network.

pub mod feed;
pub mod resources;

pub use feed::{order_feed, render_feed};
pub use resources::{extract_results, group_by_organization, organization_key};
