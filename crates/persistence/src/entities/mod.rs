//! Database entity definitions.

pub mod cms;
pub mod news_item;

pub use cms::{NewsItemPluginEntity, PlacementEntity, PlacementWithPluginEntity};
pub use news_item::{NewsCategoryDb, NewsItemEntity};
