mod get_by_id;
mod get_by_slug;
mod latest;
mod list;
mod service;
mod table_status;

pub use get_by_id::GetContentByIdQuery;
pub use get_by_slug::GetPublishedContentQuery;
pub use latest::{DEFAULT_LATEST_LIMIT, LatestContentQuery, MAX_LATEST_LIMIT};
pub use list::ListContentQuery;
pub use service::ContentQueryService;
