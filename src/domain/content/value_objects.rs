use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// The two independent content tables. Slugs are unique across both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Blog,
    Writing,
}

impl Collection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Writing => "writing",
        }
    }

    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Blog => "blog_posts",
            Self::Writing => "writings",
        }
    }

    /// JSON key used for a single item in response envelopes.
    pub const fn item_key(self) -> &'static str {
        match self {
            Self::Blog => "post",
            Self::Writing => "writing",
        }
    }

    /// JSON key used for a page of items in response envelopes.
    pub const fn list_key(self) -> &'static str {
        match self {
            Self::Blog => "posts",
            Self::Writing => "writings",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Blog => "post",
            Self::Writing => "writing",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(Uuid);

impl ContentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> DomainResult<Self> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| DomainError::Validation("invalid content id".into()))
    }

    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for ContentId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<ContentId> for Uuid {
    fn from(value: ContentId) -> Self {
        value.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn required_text(value: String, field: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTitle(String);

impl ContentTitle {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        required_text(value.into(), "title").map(Self)
    }

    /// Stored text is taken as-is; only new input is validated.
    pub fn from_persisted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Title given to a duplicated item.
    pub fn copy_of(&self) -> Self {
        Self(format!("{} (Copy)", self.0))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentExcerpt(String);

impl ContentExcerpt {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        required_text(value.into(), "excerpt").map(Self)
    }

    pub fn from_persisted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownBody(String);

impl MarkdownBody {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        required_text(value.into(), "content").map(Self)
    }

    pub fn from_persisted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A persisted or about-to-be-persisted slug.
///
/// `new` enforces the URL-safe shape (`a-z`, `0-9`, single hyphens, no hyphen
/// at either end). Rows read back from storage go through `from_persisted`,
/// which only requires non-emptiness so that legacy rows stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentSlug(String);

impl ContentSlug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if !is_url_safe_slug(&value) {
            return Err(DomainError::InvalidSlug(format!(
                "slug {value:?} must be lowercase letters, digits and single hyphens"
            )));
        }
        Ok(Self(value))
    }

    pub fn from_persisted(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::InvalidSlug("slug cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ContentSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_url_safe_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Ordered tag list. Blank entries are dropped, the rest trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn from_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            items
                .into_iter()
                .map(|item| item.as_ref().trim().to_owned())
                .filter(|item| !item.is_empty())
                .collect(),
        )
    }

    pub fn from_csv(raw: &str) -> Self {
        Self::from_list(raw.split(','))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
}

impl ContentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl FromStr for ContentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(DomainError::Validation(
                "status must be \"draft\" or \"published\"".into(),
            )),
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
