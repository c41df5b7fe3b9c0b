// src/presentation/http/controllers/content.rs
//! Handlers shared by both collections. The router injects the target
//! [`Collection`] as an extension on each nested router.
use crate::application::{
    commands::content::{
        CreateContentCommand, DeleteContentCommand, DuplicateContentCommand, UpdateContentCommand,
    },
    dto::{ContentItemDto, ContentListDto, ContentSummaryDto, TagsInput},
    queries::content::{
        GetContentByIdQuery, GetPublishedContentQuery, LatestContentQuery, ListContentQuery,
    },
};
use crate::domain::content::{Audience, Collection};
use crate::presentation::http::{
    controllers::{ok_envelope, ok_only, to_value},
    error::{HttpResult, IntoHttpResult},
    extractors::{AdminSession, JsonBody},
    state::HttpState,
};
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Paging and filter parameters. Numbers that do not parse are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub q: Option<String>,
    pub tag: Option<String>,
    pub sort: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListParams {
    fn into_query(self, collection: Collection, audience: Audience) -> ListContentQuery {
        ListContentQuery {
            collection,
            audience,
            status: self.status,
            search: self.q,
            tag: self.tag,
            sort: self.sort,
            page: parse_number(self.page.as_deref()),
            page_size: parse_number(self.page_size.as_deref()),
        }
    }
}

fn parse_number(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse().ok())
}

#[derive(Debug, Default, Deserialize)]
pub struct LatestParams {
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPayload {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content_markdown: Option<String>,
    pub tags: Option<TagsInput>,
    pub status: Option<String>,
}

fn list_response<T: Serialize>(
    collection: Collection,
    page: &ContentListDto<T>,
) -> HttpResult<Json<Value>> {
    Ok(ok_envelope([
        (collection.list_key(), to_value(&page.items)?),
        ("pagination", to_value(&page.pagination)?),
    ]))
}

fn item_response(collection: Collection, item: &ContentItemDto) -> HttpResult<Json<Value>> {
    Ok(ok_envelope([(collection.item_key(), to_value(item)?)]))
}

pub async fn list_published(
    Extension(state): Extension<HttpState>,
    Extension(collection): Extension<Collection>,
    Query(params): Query<ListParams>,
) -> HttpResult<Json<Value>> {
    let page = state
        .services
        .content_queries
        .list::<ContentSummaryDto>(params.into_query(collection, Audience::Public))
        .await
        .into_http()?;
    list_response(collection, &page)
}

pub async fn get_published(
    Extension(state): Extension<HttpState>,
    Extension(collection): Extension<Collection>,
    Path(slug): Path<String>,
) -> HttpResult<Json<Value>> {
    let item = state
        .services
        .content_queries
        .get_published_by_slug(GetPublishedContentQuery { collection, slug })
        .await
        .into_http()?;
    item_response(collection, &item)
}

pub async fn latest(
    Extension(state): Extension<HttpState>,
    Query(params): Query<LatestParams>,
) -> HttpResult<Json<Value>> {
    let items = state
        .services
        .content_queries
        .latest(LatestContentQuery {
            limit: parse_number(params.limit.as_deref()),
        })
        .await
        .into_http()?;
    Ok(ok_envelope([("items", to_value(&items)?)]))
}

pub async fn admin_list(
    Extension(state): Extension<HttpState>,
    Extension(collection): Extension<Collection>,
    AdminSession(_admin): AdminSession,
    Query(params): Query<ListParams>,
) -> HttpResult<Json<Value>> {
    let page = state
        .services
        .content_queries
        .list::<ContentItemDto>(params.into_query(collection, Audience::Admin))
        .await
        .into_http()?;
    list_response(collection, &page)
}

pub async fn admin_create(
    Extension(state): Extension<HttpState>,
    Extension(collection): Extension<Collection>,
    AdminSession(admin): AdminSession,
    JsonBody(payload): JsonBody<ContentPayload>,
) -> HttpResult<(StatusCode, Json<Value>)> {
    let command = CreateContentCommand {
        collection,
        title: payload.title,
        slug: payload.slug,
        excerpt: payload.excerpt,
        content_markdown: payload.content_markdown,
        tags: payload.tags,
        status: payload.status,
    };
    let created = state
        .services
        .content_commands
        .create(command)
        .await
        .into_http()?;
    tracing::debug!(admin = %admin.username, id = %created.id, "created via admin api");
    Ok((StatusCode::CREATED, item_response(collection, &created)?))
}

pub async fn admin_get(
    Extension(state): Extension<HttpState>,
    Extension(collection): Extension<Collection>,
    AdminSession(_admin): AdminSession,
    Path(id): Path<String>,
) -> HttpResult<Json<Value>> {
    let item = state
        .services
        .content_queries
        .get_by_id(GetContentByIdQuery { collection, id })
        .await
        .into_http()?;
    item_response(collection, &item)
}

pub async fn admin_update(
    Extension(state): Extension<HttpState>,
    Extension(collection): Extension<Collection>,
    AdminSession(_admin): AdminSession,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ContentPayload>,
) -> HttpResult<Json<Value>> {
    let command = UpdateContentCommand {
        collection,
        id,
        title: payload.title,
        slug: payload.slug,
        excerpt: payload.excerpt,
        content_markdown: payload.content_markdown,
        tags: payload.tags,
        status: payload.status,
    };
    let updated = state
        .services
        .content_commands
        .update(command)
        .await
        .into_http()?;
    item_response(collection, &updated)
}

pub async fn admin_delete(
    Extension(state): Extension<HttpState>,
    Extension(collection): Extension<Collection>,
    AdminSession(_admin): AdminSession,
    Path(id): Path<String>,
) -> HttpResult<Json<Value>> {
    state
        .services
        .content_commands
        .delete(DeleteContentCommand { collection, id })
        .await
        .into_http()?;
    Ok(ok_only())
}

pub async fn admin_duplicate(
    Extension(state): Extension<HttpState>,
    Extension(collection): Extension<Collection>,
    AdminSession(_admin): AdminSession,
    Path(id): Path<String>,
) -> HttpResult<(StatusCode, Json<Value>)> {
    let copy = state
        .services
        .content_commands
        .duplicate(DuplicateContentCommand { collection, id })
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, item_response(collection, &copy)?))
}
