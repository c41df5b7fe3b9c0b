use super::{ContentCommandService, service::not_found};
use crate::{
    application::error::ApplicationResult,
    domain::{
        content::{Collection, ContentId},
        errors::DomainError,
    },
};

#[derive(Debug, Clone)]
pub struct DeleteContentCommand {
    pub collection: Collection,
    pub id: String,
}

impl ContentCommandService {
    pub async fn delete(&self, command: DeleteContentCommand) -> ApplicationResult<()> {
        let id = ContentId::parse(&command.id)?;
        match self.write_repo.delete(command.collection, id).await {
            Ok(()) => {
                tracing::info!(collection = command.collection.as_str(), id = %id, "content deleted");
                Ok(())
            }
            Err(DomainError::NotFound(_)) => Err(not_found(command.collection)),
            Err(err) => Err(err.into()),
        }
    }
}
