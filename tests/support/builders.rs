// tests/support/builders.rs
use chrono::{DateTime, Utc};
use folio_core::domain::content::{
    Collection, ContentExcerpt, ContentId, ContentItem, ContentSlug, ContentStatus, ContentTitle,
    MarkdownBody, Tags,
};

use super::mocks::fixed_now;

pub struct ContentItemBuilder {
    collection: Collection,
    id: ContentId,
    title: String,
    slug: String,
    tags: Vec<String>,
    status: ContentStatus,
    published_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl ContentItemBuilder {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            id: ContentId::generate(),
            title: "Test Item".into(),
            slug: "test-item".into(),
            tags: Vec::new(),
            status: ContentStatus::Draft,
            published_at: None,
            updated_at: fixed_now(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| (*t).to_owned()).collect();
        self
    }

    pub fn published_at(mut self, at: DateTime<Utc>) -> Self {
        self.status = ContentStatus::Published;
        self.published_at = Some(at);
        self.updated_at = at;
        self
    }

    pub fn published(self) -> Self {
        self.published_at(fixed_now())
    }

    pub fn build(self) -> ContentItem {
        ContentItem {
            id: self.id,
            collection: self.collection,
            title: ContentTitle::new(self.title).unwrap(),
            slug: ContentSlug::new(self.slug).unwrap(),
            excerpt: ContentExcerpt::new("A short excerpt").unwrap(),
            body: MarkdownBody::new("# Heading\n\nBody text").unwrap(),
            tags: Tags::from_list(self.tags),
            status: self.status,
            published_at: self.published_at,
            created_at: fixed_now(),
            updated_at: self.updated_at,
        }
    }
}
