use super::ContentQueryService;
use crate::{
    application::{
        dto::{ContentListDto, PaginationDto},
        error::ApplicationResult,
    },
    domain::content::{
        Audience, Collection, ContentItem, ContentListFilter, ContentSort, ContentStatus,
    },
};

#[derive(Debug, Clone)]
pub struct ListContentQuery {
    pub collection: Collection,
    pub audience: Audience,
    pub status: Option<String>,
    pub search: Option<String>,
    pub tag: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ContentQueryService {
    /// Lists one page. Public audiences only ever see published items; an
    /// unrecognised `status` or `sort` is ignored rather than rejected.
    pub async fn list<T>(&self, query: ListContentQuery) -> ApplicationResult<ContentListDto<T>>
    where
        T: From<ContentItem>,
    {
        let status = query
            .status
            .as_deref()
            .and_then(|raw| raw.parse::<ContentStatus>().ok());
        let sort = query
            .sort
            .as_deref()
            .and_then(|raw| raw.parse::<ContentSort>().ok())
            .unwrap_or_default();

        let filter = ContentListFilter::new(
            query.audience,
            status,
            query.search.as_deref(),
            query.tag.as_deref(),
            sort,
            query.page,
            query.page_size,
        );

        let page = self.read_repo.list(query.collection, &filter).await?;
        Ok(ContentListDto {
            items: page.items.into_iter().map(T::from).collect(),
            pagination: PaginationDto::new(filter.page, filter.page_size, page.total),
        })
    }
}
