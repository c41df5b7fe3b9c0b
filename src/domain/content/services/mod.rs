// src/domain/content/services/mod.rs
mod latest;
mod slug;

pub use latest::merge_latest;
pub use slug::{ContentSlugService, MAX_SLUG_ATTEMPTS, generate_slug};
