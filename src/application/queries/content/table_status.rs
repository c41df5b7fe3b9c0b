use super::ContentQueryService;
use crate::{
    application::{
        dto::{TableAvailability, TableStatusDto, TableStatusTables},
        error::ApplicationResult,
    },
    domain::{content::Collection, errors::DomainError},
};

impl ContentQueryService {
    /// Reports whether each content table exists. Any failure other than a
    /// missing table is returned as an error.
    pub async fn table_status(&self) -> ApplicationResult<TableStatusDto> {
        let (blog_posts, writings) = tokio::join!(
            self.availability(Collection::Blog),
            self.availability(Collection::Writing),
        );
        let (blog_posts, writings) = (blog_posts?, writings?);
        let all_tables_exist = blog_posts.exists && writings.exists;

        Ok(TableStatusDto {
            tables: TableStatusTables {
                blog_posts,
                writings,
            },
            all_tables_exist,
        })
    }

    async fn availability(&self, collection: Collection) -> ApplicationResult<TableAvailability> {
        match self.read_repo.probe(collection).await {
            Ok(()) => Ok(TableAvailability {
                exists: true,
                error: None,
            }),
            Err(err @ DomainError::CollectionUnavailable(_)) => Ok(TableAvailability {
                exists: false,
                error: Some(err.to_string()),
            }),
            Err(err) => Err(err.into()),
        }
    }
}
