use super::ContentQueryService;
use crate::{
    application::{dto::LatestItemDto, error::ApplicationResult},
    domain::{
        content::{Collection, ContentItem, merge_latest},
        errors::{DomainError, DomainResult},
    },
};

pub const DEFAULT_LATEST_LIMIT: u32 = 3;
pub const MAX_LATEST_LIMIT: u32 = 20;

#[derive(Debug, Clone, Copy, Default)]
pub struct LatestContentQuery {
    pub limit: Option<u32>,
}

impl ContentQueryService {
    /// Newest published items across both collections, each tagged with its
    /// collection. A collection whose table is missing contributes nothing.
    pub async fn latest(&self, query: LatestContentQuery) -> ApplicationResult<Vec<LatestItemDto>> {
        let limit = query
            .limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LATEST_LIMIT)
            .min(MAX_LATEST_LIMIT);

        let (blog_posts, writings) = tokio::join!(
            self.latest_in(Collection::Blog, limit),
            self.latest_in(Collection::Writing, limit),
        );

        let merged = merge_latest(blog_posts?, writings?, limit as usize);
        Ok(merged.into_iter().map(Into::into).collect())
    }

    async fn latest_in(&self, collection: Collection, limit: u32) -> DomainResult<Vec<ContentItem>> {
        match self.read_repo.latest_published(collection, limit).await {
            Err(DomainError::CollectionUnavailable(missing)) => {
                tracing::warn!(collection = %missing, "table missing, skipping in latest feed");
                Ok(Vec::new())
            }
            other => other,
        }
    }
}
