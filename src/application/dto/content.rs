use crate::domain::content::{Collection, ContentItem, ContentStatus, Tags};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::serde_time;

/// Full record as returned by item endpoints and admin listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content_markdown: String,
    pub tags: Vec<String>,
    pub status: ContentStatus,
    #[serde(default, with = "serde_time::option")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<ContentItem> for ContentItemDto {
    fn from(item: ContentItem) -> Self {
        Self {
            id: item.id.into(),
            title: item.title.into_inner(),
            slug: item.slug.into_inner(),
            excerpt: item.excerpt.into_inner(),
            content_markdown: item.body.into_inner(),
            tags: item.tags.into_inner(),
            status: item.status,
            published_at: item.published_at,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Public listing row; the markdown body is left out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummaryDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    #[serde(default, with = "serde_time::option")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<ContentItem> for ContentSummaryDto {
    fn from(item: ContentItem) -> Self {
        Self {
            id: item.id.into(),
            title: item.title.into_inner(),
            slug: item.slug.into_inner(),
            excerpt: item.excerpt.into_inner(),
            tags: item.tags.into_inner(),
            published_at: item.published_at,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestItemDto {
    #[serde(rename = "type")]
    pub kind: Collection,
    #[serde(flatten)]
    pub item: ContentSummaryDto,
}

impl From<ContentItem> for LatestItemDto {
    fn from(item: ContentItem) -> Self {
        Self {
            kind: item.collection,
            item: item.into(),
        }
    }
}

/// Tags as sent by clients: a JSON array or one comma-separated string.
/// Any other JSON value reads as no tags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Csv(String),
    Unsupported(serde_json::Value),
}

impl TagsInput {
    pub fn into_tags(self) -> Tags {
        match self {
            Self::List(items) => Tags::from_list(items),
            Self::Csv(raw) => Tags::from_csv(&raw),
            Self::Unsupported(_) => Tags::default(),
        }
    }
}
