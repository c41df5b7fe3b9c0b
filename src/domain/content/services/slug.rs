use std::sync::Arc;

use crate::domain::content::repository::SlugIndex;
use crate::domain::content::value_objects::{Collection, ContentId, ContentSlug};
use crate::domain::errors::{DomainError, DomainResult};

/// Upper bound on candidates tried by [`ContentSlugService::ensure_unique_slug`].
pub const MAX_SLUG_ATTEMPTS: u32 = 100;

/// Turns a title into a candidate slug.
///
/// Lowercases and trims the input, drops every character that is not an ASCII
/// letter, digit, underscore, whitespace or hyphen, folds each run of
/// whitespace, underscores and hyphens into a single hyphen and never emits a
/// hyphen at either end. The result may be empty; callers must reject that
/// before persisting.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut separator_pending = false;

    for ch in lowered.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if separator_pending && !slug.is_empty() {
                slug.push('-');
            }
            separator_pending = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '_' || ch == '-' {
            separator_pending = true;
        }
    }

    slug
}

/// Domain service producing slugs that are unique across both collections.
pub struct ContentSlugService {
    index: Arc<dyn SlugIndex>,
}

impl ContentSlugService {
    pub fn new(index: Arc<dyn SlugIndex>) -> Self {
        Self { index }
    }

    /// Returns `candidate`, or `candidate-N` for the smallest `N` in
    /// `2..=MAX_SLUG_ATTEMPTS` that no other item uses.
    ///
    /// A match on `exclude_id` only counts as "free" when it lives in
    /// `collection`; an equal id in the other table is still a conflict.
    /// A table that does not exist yet contributes no matches.
    ///
    /// The check is not atomic with the caller's write. Two requests racing on
    /// the same title can both get the same answer; the per-table unique index
    /// catches same-collection duplicates, nothing catches cross-collection
    /// ones.
    pub async fn ensure_unique_slug(
        &self,
        candidate: &str,
        exclude_id: Option<ContentId>,
        collection: Collection,
    ) -> DomainResult<ContentSlug> {
        let base = candidate.trim();
        if base.is_empty() {
            return Err(DomainError::InvalidSlug(
                "slug must be a non-empty string".into(),
            ));
        }
        let base = ContentSlug::new(base)?;

        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let slug = if attempt == 1 {
                base.clone()
            } else {
                ContentSlug::new(format!("{base}-{attempt}"))?
            };

            let (blog, writing) = tokio::join!(
                self.lookup(Collection::Blog, slug.as_str()),
                self.lookup(Collection::Writing, slug.as_str()),
            );
            let owners = [(Collection::Blog, blog?), (Collection::Writing, writing?)];

            let conflict = owners.iter().any(|(owner_collection, owner)| {
                owner.is_some_and(|id| !(*owner_collection == collection && Some(id) == exclude_id))
            });

            if !conflict {
                return Ok(slug);
            }
            tracing::debug!(slug = %slug, attempt, "slug taken, trying next suffix");
        }

        tracing::error!(
            candidate = %base,
            attempts = MAX_SLUG_ATTEMPTS,
            collection = collection.as_str(),
            "exhausted slug suffixes"
        );
        Err(DomainError::SlugExhausted {
            candidate: base.into_inner(),
            attempts: MAX_SLUG_ATTEMPTS,
        })
    }

    async fn lookup(&self, collection: Collection, slug: &str) -> DomainResult<Option<ContentId>> {
        match self.index.find_id_by_slug(collection, slug).await {
            Err(DomainError::CollectionUnavailable(missing)) => {
                tracing::warn!(collection = %missing, "table missing, treating slug lookup as no match");
                Ok(None)
            }
            other => other,
        }
    }
}
