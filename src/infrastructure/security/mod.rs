// src/infrastructure/security/mod.rs
pub mod credentials;
pub mod session;
pub mod token;
