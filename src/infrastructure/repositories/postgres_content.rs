// src/infrastructure/repositories/postgres_content.rs
use super::map_sqlx;
use crate::domain::content::{
    Collection, ContentExcerpt, ContentId, ContentItem, ContentListFilter, ContentOrder,
    ContentPage, ContentReadRepository, ContentSlug, ContentStatus, ContentTitle, ContentUpdate,
    ContentWriteRepository, MarkdownBody, NewContentItem, SlugIndex, Tags,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const COLUMNS: &str =
    "id, title, slug, excerpt, content_markdown, tags, status, published_at, created_at, updated_at";

/// Both content tables share one layout, so a single repository serves
/// either collection; the table is picked per call.
#[derive(Clone)]
pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ContentRow {
    id: Uuid,
    title: String,
    slug: String,
    excerpt: String,
    content_markdown: String,
    tags: Vec<String>,
    status: String,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ContentRow {
    fn into_item(self, collection: Collection) -> DomainResult<ContentItem> {
        let status = self.status.parse::<ContentStatus>().map_err(|_| {
            DomainError::Persistence(format!(
                "unexpected status {:?} in {collection}",
                self.status
            ))
        })?;

        let slug = ContentSlug::from_persisted(self.slug).map_err(|_| {
            DomainError::Persistence(format!("row {} in {collection} has a blank slug", self.id))
        })?;

        Ok(ContentItem {
            id: ContentId::from(self.id),
            collection,
            title: ContentTitle::from_persisted(self.title),
            slug,
            excerpt: ContentExcerpt::from_persisted(self.excerpt),
            body: MarkdownBody::from_persisted(self.content_markdown),
            tags: Tags::from_list(self.tags),
            status,
            published_at: self.published_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn into_items(rows: Vec<ContentRow>, collection: Collection) -> DomainResult<Vec<ContentItem>> {
    rows.into_iter()
        .map(|row| row.into_item(collection))
        .collect()
}

/// `%` and `_` in user input match literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

impl PostgresContentRepository {
    fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ContentListFilter) {
        builder.push(" WHERE TRUE");

        if let Some(status) = filter.status {
            builder.push(" AND status = ");
            builder.push_bind(status.as_str());
        }

        if let Some(search) = &filter.search {
            let pattern = like_pattern(search);
            builder.push(" AND (title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR excerpt ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR content_markdown ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        if let Some(tag) = &filter.tag {
            builder.push(" AND ");
            builder.push_bind(tag.clone());
            builder.push(" = ANY(tags)");
        }
    }

    const fn order_clause(order: ContentOrder) -> &'static str {
        match order {
            ContentOrder::PublishedDesc => {
                " ORDER BY published_at DESC NULLS LAST, updated_at DESC, created_at DESC, id"
            }
            ContentOrder::PublishedAsc => " ORDER BY published_at ASC NULLS LAST, created_at ASC, id",
            ContentOrder::UpdatedDesc => " ORDER BY updated_at DESC, id",
            ContentOrder::CreatedAsc => " ORDER BY created_at ASC, id",
            ContentOrder::TitleAsc => " ORDER BY title ASC, id",
        }
    }

    async fn fetch_page(
        &self,
        collection: Collection,
        filter: &ContentListFilter,
    ) -> DomainResult<Vec<ContentItem>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {COLUMNS} FROM {}",
            collection.table_name()
        ));
        Self::push_filters(&mut builder, filter);
        builder.push(Self::order_clause(filter.order));
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(filter.page_size));
        builder.push(" OFFSET ");
        builder.push_bind(i64::try_from(filter.offset()).unwrap_or(i64::MAX));

        let rows = builder
            .build_query_as::<ContentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx(collection))?;

        into_items(rows, collection)
    }

    async fn count(&self, collection: Collection, filter: &ContentListFilter) -> DomainResult<u64> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", collection.table_name()));
        Self::push_filters(&mut builder, filter);

        let total: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx(collection))?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}

#[async_trait]
impl ContentWriteRepository for PostgresContentRepository {
    async fn insert(&self, item: NewContentItem) -> DomainResult<ContentItem> {
        let NewContentItem {
            id,
            collection,
            title,
            slug,
            excerpt,
            body,
            tags,
            status,
            published_at,
            created_at,
            updated_at,
        } = item;

        let sql = format!(
            "INSERT INTO {} ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {COLUMNS}",
            collection.table_name()
        );
        let row = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(id.as_uuid())
            .bind(title.as_str())
            .bind(slug.as_str())
            .bind(excerpt.as_str())
            .bind(body.as_str())
            .bind(tags.as_slice())
            .bind(status.as_str())
            .bind(published_at)
            .bind(created_at)
            .bind(updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx(collection))?;

        row.into_item(collection)
    }

    async fn update(&self, update: ContentUpdate) -> DomainResult<ContentItem> {
        let ContentUpdate {
            id,
            collection,
            title,
            slug,
            excerpt,
            body,
            tags,
            status,
            published_at,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "UPDATE {} SET updated_at = ",
            collection.table_name()
        ));
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(title.into_inner());
        }

        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }

        if let Some(excerpt) = excerpt {
            builder.push(", excerpt = ");
            builder.push_bind(excerpt.into_inner());
        }

        if let Some(body) = body {
            builder.push(", content_markdown = ");
            builder.push_bind(body.into_inner());
        }

        if let Some(tags) = tags {
            builder.push(", tags = ");
            builder.push_bind(tags.into_inner());
        }

        if let Some(status) = status {
            builder.push(", status = ");
            builder.push_bind(status.as_str());
        }

        if let Some(published_at) = published_at {
            builder.push(", published_at = ");
            builder.push_bind(published_at);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id.as_uuid());
        builder.push(format!(" RETURNING {COLUMNS}"));

        let row = builder
            .build_query_as::<ContentRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx(collection))?
            .ok_or_else(|| DomainError::NotFound(format!("{} not found", collection.label())))?;

        row.into_item(collection)
    }

    async fn delete(&self, collection: Collection, id: ContentId) -> DomainResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", collection.table_name());
        let result = sqlx::query(&sql)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx(collection))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!(
                "{} not found",
                collection.label()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentReadRepository for PostgresContentRepository {
    async fn find_by_id(
        &self,
        collection: Collection,
        id: ContentId,
    ) -> DomainResult<Option<ContentItem>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE id = $1",
            collection.table_name()
        );
        let row = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx(collection))?;

        row.map(|row| row.into_item(collection)).transpose()
    }

    async fn find_by_slug(
        &self,
        collection: Collection,
        slug: &str,
    ) -> DomainResult<Option<ContentItem>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE slug = $1",
            collection.table_name()
        );
        let row = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx(collection))?;

        row.map(|row| row.into_item(collection)).transpose()
    }

    async fn list(
        &self,
        collection: Collection,
        filter: &ContentListFilter,
    ) -> DomainResult<ContentPage> {
        let (items, total) = tokio::try_join!(
            self.fetch_page(collection, filter),
            self.count(collection, filter),
        )?;
        Ok(ContentPage { items, total })
    }

    async fn latest_published(
        &self,
        collection: Collection,
        limit: u32,
    ) -> DomainResult<Vec<ContentItem>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE status = 'published' \
             ORDER BY published_at DESC NULLS LAST, updated_at DESC, created_at DESC LIMIT $1",
            collection.table_name()
        );
        let rows = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx(collection))?;

        into_items(rows, collection)
    }

    async fn probe(&self, collection: Collection) -> DomainResult<()> {
        let sql = format!("SELECT 1 FROM {} LIMIT 1", collection.table_name());
        sqlx::query(&sql)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx(collection))?;
        Ok(())
    }
}

#[async_trait]
impl SlugIndex for PostgresContentRepository {
    async fn find_id_by_slug(
        &self,
        collection: Collection,
        slug: &str,
    ) -> DomainResult<Option<ContentId>> {
        let sql = format!("SELECT id FROM {} WHERE slug = $1", collection.table_name());
        let id = sqlx::query_scalar::<_, Uuid>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx(collection))?;

        Ok(id.map(ContentId::from))
    }
}
