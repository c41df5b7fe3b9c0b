use super::ContentQueryService;
use crate::{
    application::{
        dto::ContentItemDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::content::Collection,
};

pub struct GetPublishedContentQuery {
    pub collection: Collection,
    pub slug: String,
}

impl ContentQueryService {
    /// Drafts are indistinguishable from missing items.
    pub async fn get_published_by_slug(
        &self,
        query: GetPublishedContentQuery,
    ) -> ApplicationResult<ContentItemDto> {
        let not_found =
            || ApplicationError::not_found(format!("{} not found", query.collection.label()));

        let slug = query.slug.trim();
        if slug.is_empty() {
            return Err(not_found());
        }

        let item = self
            .read_repo
            .find_by_slug(query.collection, slug)
            .await?
            .filter(|item| item.is_published())
            .ok_or_else(not_found)?;

        Ok(item.into())
    }
}
