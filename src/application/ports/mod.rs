// src/application/ports/mod.rs
pub mod mailer;
pub mod security;
pub mod time;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type TokenManagerPort = dyn security::TokenManager;
pub type SessionSignerPort = dyn security::SessionSigner;
pub type CredentialVerifierPort = dyn security::CredentialVerifier;
pub type MailerPort = dyn mailer::Mailer;
pub type ClockPort = dyn time::Clock;
