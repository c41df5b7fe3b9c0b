pub mod content;
pub mod errors;
