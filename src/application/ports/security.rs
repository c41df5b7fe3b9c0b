// src/application/ports/security.rs
use crate::application::{
    ApplicationResult,
    dto::{AdminIdentity, AuthTokenDto, SessionTicket},
};
use async_trait::async_trait;

#[async_trait]
pub trait TokenManager: Send + Sync {
    async fn issue(&self, username: &str) -> ApplicationResult<AuthTokenDto>;
    async fn authenticate(&self, token: &str) -> ApplicationResult<AdminIdentity>;
}

/// Signs and verifies the opaque session cookie value.
pub trait SessionSigner: Send + Sync {
    fn sign(&self, username: &str) -> ApplicationResult<SessionTicket>;
    /// `None` for anything malformed, tampered with or expired.
    fn verify(&self, value: &str) -> Option<AdminIdentity>;
}

/// Checks a login attempt against the single configured administrator.
pub trait CredentialVerifier: Send + Sync {
    /// `Err` when no administrator is configured at all.
    fn verify(&self, username: &str, password: &str) -> ApplicationResult<bool>;
}
