// src/application/commands/content/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::content::{
        Collection, ContentId, ContentItem, ContentReadRepository, ContentSlug, ContentStatus,
        ContentWriteRepository, generate_slug, services::ContentSlugService,
    },
};

pub struct ContentCommandService {
    pub(super) write_repo: Arc<dyn ContentWriteRepository>,
    pub(super) read_repo: Arc<dyn ContentReadRepository>,
    pub(super) slug_service: Arc<ContentSlugService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ContentCommandService {
    pub fn new(
        write_repo: Arc<dyn ContentWriteRepository>,
        read_repo: Arc<dyn ContentReadRepository>,
        slug_service: Arc<ContentSlugService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            slug_service,
            clock,
        }
    }

    pub(super) async fn load(
        &self,
        collection: Collection,
        id: ContentId,
    ) -> ApplicationResult<ContentItem> {
        self.read_repo
            .find_by_id(collection, id)
            .await?
            .ok_or_else(|| not_found(collection))
    }

    /// Normalizes `raw` and resolves it to a slug no other item uses.
    pub(super) async fn resolve_slug(
        &self,
        raw: &str,
        exclude: Option<ContentId>,
        collection: Collection,
    ) -> ApplicationResult<ContentSlug> {
        let candidate = generate_slug(raw);
        let slug = self
            .slug_service
            .ensure_unique_slug(&candidate, exclude, collection)
            .await?;
        Ok(slug)
    }
}

pub(super) fn not_found(collection: Collection) -> ApplicationError {
    ApplicationError::not_found(format!("{} not found", collection.label()))
}

pub(super) fn parse_status(raw: Option<&str>) -> ApplicationResult<Option<ContentStatus>> {
    Ok(raw.map(str::parse::<ContentStatus>).transpose()?)
}

/// A client-supplied slug wins when it is non-blank.
pub(super) fn explicit_slug(slug: Option<&str>) -> Option<&str> {
    slug.map(str::trim).filter(|s| !s.is_empty())
}
