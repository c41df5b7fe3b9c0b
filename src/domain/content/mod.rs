pub mod entity;
pub mod listing;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{ContentItem, ContentUpdate, NewContentItem};
pub use listing::{Audience, ContentListFilter, ContentOrder, ContentPage, ContentSort};
pub use repository::{ContentReadRepository, ContentWriteRepository, SlugIndex};
pub use services::{ContentSlugService, MAX_SLUG_ATTEMPTS, generate_slug, merge_latest};
pub use value_objects::{
    Collection, ContentExcerpt, ContentId, ContentSlug, ContentStatus, ContentTitle, MarkdownBody,
    Tags, is_url_safe_slug,
};
