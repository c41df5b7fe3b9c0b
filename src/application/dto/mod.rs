pub mod auth;
pub mod content;
pub mod pagination;
pub mod serde_time;
pub mod system;

pub use auth::{AdminIdentity, AuthTokenDto, LoginOutcome, SessionTicket};
pub use content::{ContentItemDto, ContentSummaryDto, LatestItemDto, TagsInput};
pub use pagination::{ContentListDto, PaginationDto};
pub use system::{TableAvailability, TableStatusDto, TableStatusTables};
