//! Domain models for the Operations Portal.

pub mod category;
pub mod cms;
pub mod news;
pub mod principal;
pub mod resource;

pub use category::{NewsAction, NewsCategory};
pub use cms::{
    AddFeedItemRequest, CreateFeedRequest, NewsItemPlugin, Placement, PlaceholderSlot,
    PluginInstance, PluginType, RenderedFeed, RenderedPlaceholder, RenderedPlacement,
};
pub use news::{
    Choice, FieldKind, FormField, NewsFields, NewsForm, NewsFormDescriptor, NewsFormPage,
    NewsItem, NewsListPage, NewsSaved,
};
pub use principal::{AccessPolicy, Principal};
pub use resource::{AllocatedResourcesPage, ResourcesByOrganization, UNKNOWN_ORGANIZATION};
