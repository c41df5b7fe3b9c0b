// src/domain/content/entity.rs
use crate::domain::content::value_objects::{
    Collection, ContentExcerpt, ContentId, ContentSlug, ContentStatus, ContentTitle, MarkdownBody,
    Tags,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct ContentItem {
    pub id: ContentId,
    pub collection: Collection,
    pub title: ContentTitle,
    pub slug: ContentSlug,
    pub excerpt: ContentExcerpt,
    pub body: MarkdownBody,
    pub tags: Tags,
    pub status: ContentStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    pub fn is_published(&self) -> bool {
        self.status == ContentStatus::Published
    }

    /// Timestamp used to order items in the combined "latest" feed.
    pub fn recency(&self) -> DateTime<Utc> {
        self.published_at.unwrap_or(self.updated_at)
    }

    /// Clone into a fresh draft under a new id and slug.
    pub fn duplicate(&self, slug: ContentSlug, now: DateTime<Utc>) -> NewContentItem {
        NewContentItem {
            id: ContentId::generate(),
            collection: self.collection,
            title: self.title.copy_of(),
            slug,
            excerpt: self.excerpt.clone(),
            body: self.body.clone(),
            tags: self.tags.clone(),
            status: ContentStatus::Draft,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The publish timestamp is recorded on the first transition into
/// `Published` and kept from then on, including across a revert to `Draft`
/// and a later republish.
pub(crate) fn published_at_for(
    status: ContentStatus,
    current: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (status, current) {
        (ContentStatus::Published, None) => Some(now),
        (_, existing) => existing,
    }
}

#[derive(Debug, Clone)]
pub struct NewContentItem {
    pub id: ContentId,
    pub collection: Collection,
    pub title: ContentTitle,
    pub slug: ContentSlug,
    pub excerpt: ContentExcerpt,
    pub body: MarkdownBody,
    pub tags: Tags,
    pub status: ContentStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; `None` leaves the stored column untouched.
#[derive(Debug, Clone)]
pub struct ContentUpdate {
    pub id: ContentId,
    pub collection: Collection,
    pub title: Option<ContentTitle>,
    pub slug: Option<ContentSlug>,
    pub excerpt: Option<ContentExcerpt>,
    pub body: Option<MarkdownBody>,
    pub tags: Option<Tags>,
    pub status: Option<ContentStatus>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl ContentUpdate {
    pub const fn new(id: ContentId, collection: Collection, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            collection,
            title: None,
            slug: None,
            excerpt: None,
            body: None,
            tags: None,
            status: None,
            published_at: None,
            updated_at,
        }
    }

    pub fn with_title(mut self, title: ContentTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: ContentSlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_excerpt(mut self, excerpt: ContentExcerpt) -> Self {
        self.excerpt = Some(excerpt);
        self
    }

    pub fn with_body(mut self, body: MarkdownBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Sets the status and derives the publish timestamp from the one the
    /// item already carries. A `None` result never clears a stored one.
    pub fn with_status(
        mut self,
        status: ContentStatus,
        previously_published: Option<DateTime<Utc>>,
    ) -> Self {
        self.status = Some(status);
        self.published_at = published_at_for(status, previously_published, self.updated_at);
        self
    }
}
