use super::ContentQueryService;
use crate::{
    application::{
        dto::ContentItemDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::content::{Collection, ContentId},
};

pub struct GetContentByIdQuery {
    pub collection: Collection,
    pub id: String,
}

impl ContentQueryService {
    pub async fn get_by_id(&self, query: GetContentByIdQuery) -> ApplicationResult<ContentItemDto> {
        let id = ContentId::parse(&query.id)?;
        self.read_repo
            .find_by_id(query.collection, id)
            .await?
            .map(Into::into)
            .ok_or_else(|| {
                ApplicationError::not_found(format!("{} not found", query.collection.label()))
            })
    }
}
