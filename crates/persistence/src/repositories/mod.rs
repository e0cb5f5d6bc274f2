//! Repository implementations for database operations.

pub mod cms;
pub mod news_item;

pub use cms::CmsRepository;
pub use news_item::{Author, NewsItemRepository};
