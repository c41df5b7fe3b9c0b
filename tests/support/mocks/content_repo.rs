// tests/support/mocks/content_repo.rs
use async_trait::async_trait;
use folio_core::domain::{
    content::{
        Collection, ContentId, ContentItem, ContentListFilter, ContentOrder, ContentPage,
        ContentReadRepository, ContentUpdate, ContentWriteRepository, NewContentItem, SlugIndex,
    },
    errors::{DomainError, DomainResult},
};
use std::collections::HashSet;
use std::sync::Mutex;

/// Both content tables in one vector. A collection can be marked missing to
/// mimic a database that has not been migrated yet.
#[derive(Debug, Default)]
pub struct InMemoryContentRepo {
    items: Mutex<Vec<ContentItem>>,
    missing: Mutex<HashSet<Collection>>,
}

impl InMemoryContentRepo {
    pub fn seed(&self, item: ContentItem) {
        self.items.lock().unwrap().push(item);
    }

    pub fn drop_table(&self, collection: Collection) {
        self.missing.lock().unwrap().insert(collection);
    }

    pub fn all(&self, collection: Collection) -> Vec<ContentItem> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.collection == collection)
            .cloned()
            .collect()
    }

    pub fn find(&self, collection: Collection, id: ContentId) -> Option<ContentItem> {
        self.all(collection).into_iter().find(|item| item.id == id)
    }

    fn available(&self, collection: Collection) -> DomainResult<()> {
        if self.missing.lock().unwrap().contains(&collection) {
            return Err(DomainError::CollectionUnavailable(collection));
        }
        Ok(())
    }
}

fn duplicate_slug(collection: Collection) -> DomainError {
    DomainError::Conflict(format!(
        "A {} with this slug already exists",
        collection.label()
    ))
}

fn matches_filter(item: &ContentItem, filter: &ContentListFilter) -> bool {
    if filter.status.is_some_and(|status| item.status != status) {
        return false;
    }
    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        let hit = [item.title.as_str(), item.excerpt.as_str(), item.body.as_str()]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }
    if let Some(tag) = &filter.tag {
        if !item.tags.as_slice().iter().any(|t| t == tag) {
            return false;
        }
    }
    true
}

fn sort_items(items: &mut [ContentItem], order: ContentOrder) {
    match order {
        ContentOrder::PublishedDesc => items.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
        ContentOrder::PublishedAsc => items.sort_by(|a, b| a.published_at.cmp(&b.published_at)),
        ContentOrder::UpdatedDesc => items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        ContentOrder::CreatedAsc => items.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        ContentOrder::TitleAsc => items.sort_by(|a, b| a.title.as_str().cmp(b.title.as_str())),
    }
}

#[async_trait]
impl ContentWriteRepository for InMemoryContentRepo {
    async fn insert(&self, item: NewContentItem) -> DomainResult<ContentItem> {
        self.available(item.collection)?;
        let mut items = self.items.lock().unwrap();
        if items
            .iter()
            .any(|existing| existing.collection == item.collection && existing.slug == item.slug)
        {
            return Err(duplicate_slug(item.collection));
        }

        let stored = ContentItem {
            id: item.id,
            collection: item.collection,
            title: item.title,
            slug: item.slug,
            excerpt: item.excerpt,
            body: item.body,
            tags: item.tags,
            status: item.status,
            published_at: item.published_at,
            created_at: item.created_at,
            updated_at: item.updated_at,
        };
        items.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: ContentUpdate) -> DomainResult<ContentItem> {
        self.available(update.collection)?;
        let mut items = self.items.lock().unwrap();

        if let Some(slug) = &update.slug {
            let taken = items.iter().any(|other| {
                other.collection == update.collection && other.id != update.id && &other.slug == slug
            });
            if taken {
                return Err(duplicate_slug(update.collection));
            }
        }

        let item = items
            .iter_mut()
            .find(|item| item.collection == update.collection && item.id == update.id)
            .ok_or_else(|| DomainError::NotFound(format!("{} not found", update.collection.label())))?;

        if let Some(title) = update.title {
            item.title = title;
        }
        if let Some(slug) = update.slug {
            item.slug = slug;
        }
        if let Some(excerpt) = update.excerpt {
            item.excerpt = excerpt;
        }
        if let Some(body) = update.body {
            item.body = body;
        }
        if let Some(tags) = update.tags {
            item.tags = tags;
        }
        if let Some(status) = update.status {
            item.status = status;
        }
        if update.published_at.is_some() {
            item.published_at = update.published_at;
        }
        item.updated_at = update.updated_at;
        Ok(item.clone())
    }

    async fn delete(&self, collection: Collection, id: ContentId) -> DomainResult<()> {
        self.available(collection)?;
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| !(item.collection == collection && item.id == id));
        if items.len() == before {
            return Err(DomainError::NotFound(format!("{} not found", collection.label())));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentReadRepository for InMemoryContentRepo {
    async fn find_by_id(
        &self,
        collection: Collection,
        id: ContentId,
    ) -> DomainResult<Option<ContentItem>> {
        self.available(collection)?;
        Ok(self.find(collection, id))
    }

    async fn find_by_slug(
        &self,
        collection: Collection,
        slug: &str,
    ) -> DomainResult<Option<ContentItem>> {
        self.available(collection)?;
        Ok(self
            .all(collection)
            .into_iter()
            .find(|item| item.slug.as_str() == slug))
    }

    async fn list(
        &self,
        collection: Collection,
        filter: &ContentListFilter,
    ) -> DomainResult<ContentPage> {
        self.available(collection)?;
        let mut matching: Vec<ContentItem> = self
            .all(collection)
            .into_iter()
            .filter(|item| matches_filter(item, filter))
            .collect();
        sort_items(&mut matching, filter.order);

        let total = matching.len() as u64;
        let offset = usize::try_from(filter.offset()).unwrap();
        let items = matching
            .into_iter()
            .skip(offset)
            .take(filter.page_size as usize)
            .collect();
        Ok(ContentPage { items, total })
    }

    async fn latest_published(
        &self,
        collection: Collection,
        limit: u32,
    ) -> DomainResult<Vec<ContentItem>> {
        self.available(collection)?;
        let mut published: Vec<ContentItem> = self
            .all(collection)
            .into_iter()
            .filter(ContentItem::is_published)
            .collect();
        published.sort_by(|a, b| b.recency().cmp(&a.recency()));
        published.truncate(limit as usize);
        Ok(published)
    }

    async fn probe(&self, collection: Collection) -> DomainResult<()> {
        self.available(collection)
    }
}

#[async_trait]
impl SlugIndex for InMemoryContentRepo {
    async fn find_id_by_slug(
        &self,
        collection: Collection,
        slug: &str,
    ) -> DomainResult<Option<ContentId>> {
        self.available(collection)?;
        Ok(self
            .all(collection)
            .into_iter()
            .find(|item| item.slug.as_str() == slug)
            .map(|item| item.id))
    }
}
