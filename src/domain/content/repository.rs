use crate::domain::content::entity::{ContentItem, ContentUpdate, NewContentItem};
use crate::domain::content::listing::{ContentListFilter, ContentPage};
use crate::domain::content::value_objects::{Collection, ContentId};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ContentWriteRepository: Send + Sync {
    async fn insert(&self, item: NewContentItem) -> DomainResult<ContentItem>;
    async fn update(&self, update: ContentUpdate) -> DomainResult<ContentItem>;
    async fn delete(&self, collection: Collection, id: ContentId) -> DomainResult<()>;
}

#[async_trait]
pub trait ContentReadRepository: Send + Sync {
    async fn find_by_id(
        &self,
        collection: Collection,
        id: ContentId,
    ) -> DomainResult<Option<ContentItem>>;
    async fn find_by_slug(
        &self,
        collection: Collection,
        slug: &str,
    ) -> DomainResult<Option<ContentItem>>;
    async fn list(
        &self,
        collection: Collection,
        filter: &ContentListFilter,
    ) -> DomainResult<ContentPage>;
    /// Newest published items, most recent first.
    async fn latest_published(
        &self,
        collection: Collection,
        limit: u32,
    ) -> DomainResult<Vec<ContentItem>>;
    /// `Err(DomainError::CollectionUnavailable)` when the backing table is missing.
    async fn probe(&self, collection: Collection) -> DomainResult<()>;
}

/// Point lookup used by the unique-slug resolver.
///
/// Implementations return `DomainError::CollectionUnavailable` when the
/// collection's table has not been created yet; every other failure is a
/// real error.
#[async_trait]
pub trait SlugIndex: Send + Sync {
    async fn find_id_by_slug(
        &self,
        collection: Collection,
        slug: &str,
    ) -> DomainResult<Option<ContentId>>;
}
