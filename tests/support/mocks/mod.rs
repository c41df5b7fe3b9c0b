// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod content_repo;
pub mod mailer;
pub mod time;

pub use content_repo::InMemoryContentRepo;
pub use mailer::CapturingMailer;
pub use time::{TestClock, fixed_now};
