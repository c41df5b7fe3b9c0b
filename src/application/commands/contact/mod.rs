mod send;
mod service;

pub use send::{ContactCommand, MAX_MESSAGE_CHARS, validate_contact};
pub use service::ContactCommandService;
