use super::{
    ContentCommandService,
    service::{explicit_slug, parse_status},
};
use crate::{
    application::{
        dto::{ContentItemDto, TagsInput},
        error::ApplicationResult,
    },
    domain::content::{
        Collection, ContentExcerpt, ContentId, ContentTitle, MarkdownBody, NewContentItem,
        entity::published_at_for,
    },
};

#[derive(Debug, Clone)]
pub struct CreateContentCommand {
    pub collection: Collection,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content_markdown: Option<String>,
    pub tags: Option<TagsInput>,
    pub status: Option<String>,
}

impl ContentCommandService {
    pub async fn create(&self, command: CreateContentCommand) -> ApplicationResult<ContentItemDto> {
        let CreateContentCommand {
            collection,
            title,
            slug,
            excerpt,
            content_markdown,
            tags,
            status,
        } = command;

        let title = ContentTitle::new(title.unwrap_or_default())?;
        let excerpt = ContentExcerpt::new(excerpt.unwrap_or_default())?;
        let body = MarkdownBody::new(content_markdown.unwrap_or_default())?;
        let status = parse_status(status.as_deref())?.unwrap_or_default();
        let tags = tags.map(TagsInput::into_tags).unwrap_or_default();

        let source = explicit_slug(slug.as_deref()).unwrap_or(title.as_str());
        let slug = self.resolve_slug(source, None, collection).await?;

        let now = self.clock.now();
        let item = NewContentItem {
            id: ContentId::generate(),
            collection,
            title,
            slug,
            excerpt,
            body,
            tags,
            status,
            published_at: published_at_for(status, None, now),
            created_at: now,
            updated_at: now,
        };

        let created = self.write_repo.insert(item).await?;
        tracing::info!(
            collection = collection.as_str(),
            id = %created.id,
            slug = %created.slug,
            "content created"
        );
        Ok(created.into())
    }
}
