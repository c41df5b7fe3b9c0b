use super::ContentCommandService;
use crate::{
    application::{dto::ContentItemDto, error::ApplicationResult},
    domain::content::{Collection, ContentId, generate_slug},
};

#[derive(Debug, Clone)]
pub struct DuplicateContentCommand {
    pub collection: Collection,
    pub id: String,
}

impl ContentCommandService {
    /// Copies an item into a new draft titled "<title> (Copy)" with its own slug.
    pub async fn duplicate(
        &self,
        command: DuplicateContentCommand,
    ) -> ApplicationResult<ContentItemDto> {
        let DuplicateContentCommand { collection, id } = command;
        let id = ContentId::parse(&id)?;
        let source = self.load(collection, id).await?;

        let copy_title = source.title.copy_of();
        // Titles with nothing sluggable fall back to the source's slug.
        let base = if generate_slug(copy_title.as_str()).is_empty() {
            source.slug.as_str()
        } else {
            copy_title.as_str()
        };
        let slug = self.resolve_slug(base, None, collection).await?;

        let copy = source.duplicate(slug, self.clock.now());
        let created = self.write_repo.insert(copy).await?;
        tracing::info!(
            collection = collection.as_str(),
            source = %id,
            id = %created.id,
            slug = %created.slug,
            "content duplicated"
        );
        Ok(created.into())
    }
}
