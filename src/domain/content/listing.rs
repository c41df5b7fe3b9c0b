use crate::domain::content::entity::ContentItem;
use crate::domain::content::value_objects::ContentStatus;
use std::str::FromStr;

/// Who is listing: visitors only ever see published items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Public,
    Admin,
}

impl Audience {
    const fn page_size_bounds(self) -> (u32, u32) {
        match self {
            Self::Public => (10, 50),
            Self::Admin => (20, 100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentSort {
    #[default]
    Newest,
    Oldest,
    Title,
}

impl FromStr for ContentSort {
    type Err = std::convert::Infallible;

    /// Unknown values fall back to `Newest`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "oldest" => Self::Oldest,
            "title" => Self::Title,
            _ => Self::Newest,
        })
    }
}

/// Column ordering handed to the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOrder {
    PublishedDesc,
    PublishedAsc,
    UpdatedDesc,
    CreatedAsc,
    TitleAsc,
}

impl ContentOrder {
    pub const fn resolve(sort: ContentSort, audience: Audience) -> Self {
        match (sort, audience) {
            (ContentSort::Title, _) => Self::TitleAsc,
            (ContentSort::Newest, Audience::Public) => Self::PublishedDesc,
            (ContentSort::Oldest, Audience::Public) => Self::PublishedAsc,
            (ContentSort::Newest, Audience::Admin) => Self::UpdatedDesc,
            (ContentSort::Oldest, Audience::Admin) => Self::CreatedAsc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentListFilter {
    pub status: Option<ContentStatus>,
    pub search: Option<String>,
    pub tag: Option<String>,
    pub order: ContentOrder,
    pub page: u32,
    pub page_size: u32,
}

impl ContentListFilter {
    /// Builds a filter with normalized paging. Public listings are pinned to
    /// published items whatever `status` says.
    pub fn new(
        audience: Audience,
        status: Option<ContentStatus>,
        search: Option<&str>,
        tag: Option<&str>,
        sort: ContentSort,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Self {
        let (default_size, max_size) = audience.page_size_bounds();
        let status = match audience {
            Audience::Public => Some(ContentStatus::Published),
            Audience::Admin => status,
        };
        Self {
            status,
            search: non_blank(search),
            tag: non_blank(tag),
            order: ContentOrder::resolve(sort, audience),
            page: page.filter(|p| *p > 0).unwrap_or(1),
            page_size: page_size
                .filter(|s| *s > 0)
                .unwrap_or(default_size)
                .min(max_size),
        }
    }

    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[derive(Debug, Clone, Default)]
pub struct ContentPage {
    pub items: Vec<ContentItem>,
    pub total: u64,
}
