mod login;
mod service;

pub use login::LoginCommand;
pub use service::AuthCommandService;
