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
        Collection, ContentExcerpt, ContentId, ContentTitle, ContentUpdate, MarkdownBody,
    },
};

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone)]
pub struct UpdateContentCommand {
    pub collection: Collection,
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content_markdown: Option<String>,
    pub tags: Option<TagsInput>,
    pub status: Option<String>,
}

impl ContentCommandService {
    pub async fn update(&self, command: UpdateContentCommand) -> ApplicationResult<ContentItemDto> {
        let UpdateContentCommand {
            collection,
            id,
            title,
            slug,
            excerpt,
            content_markdown,
            tags,
            status,
        } = command;

        let id = ContentId::parse(&id)?;
        let existing = self.load(collection, id).await?;

        let title = title.map(ContentTitle::new).transpose()?;
        let excerpt = excerpt.map(ContentExcerpt::new).transpose()?;
        let body = content_markdown.map(MarkdownBody::new).transpose()?;
        let status = parse_status(status.as_deref())?;

        let now = self.clock.now();
        let mut update = ContentUpdate::new(id, collection, now);

        // The slug is only recomputed when the client touched it or the title.
        if slug.is_some() || title.is_some() {
            let source = explicit_slug(slug.as_deref())
                .or_else(|| title.as_ref().map(ContentTitle::as_str))
                .unwrap_or(existing.slug.as_str());
            let resolved = self.resolve_slug(source, Some(id), collection).await?;
            update = update.with_slug(resolved);
        }

        if let Some(title) = title {
            update = update.with_title(title);
        }
        if let Some(excerpt) = excerpt {
            update = update.with_excerpt(excerpt);
        }
        if let Some(body) = body {
            update = update.with_body(body);
        }
        if let Some(tags) = tags {
            update = update.with_tags(tags.into_tags());
        }
        if let Some(status) = status {
            update = update.with_status(status, existing.published_at);
        }

        let updated = self.write_repo.update(update).await?;
        tracing::info!(
            collection = collection.as_str(),
            id = %updated.id,
            slug = %updated.slug,
            status = %updated.status,
            "content updated"
        );
        Ok(updated.into())
    }
}
