// src/infrastructure/security/credentials.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::security::CredentialVerifier,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// The single administrator account taken from configuration.
pub struct StaticCredentials {
    username: Option<String>,
    password: Option<String>,
}

impl StaticCredentials {
    pub const fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }
}

/// Compares through HMAC tags so the time taken does not depend on where the
/// inputs first differ, or on their lengths.
fn constant_time_eq(provided: &str, expected: &str) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(b"credential-compare") else {
        return false;
    };
    mac.update(expected.as_bytes());
    let expected_tag = mac.finalize().into_bytes();

    let Ok(mut mac) = HmacSha256::new_from_slice(b"credential-compare") else {
        return false;
    };
    mac.update(provided.as_bytes());
    mac.verify_slice(&expected_tag).is_ok()
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> ApplicationResult<bool> {
        let (Some(expected_user), Some(expected_pass)) = (&self.username, &self.password) else {
            tracing::error!("AUTH_USERNAME and AUTH_PASSWORD must be set");
            return Err(ApplicationError::infrastructure(
                "Authentication is not configured.",
            ));
        };

        // Evaluate both so a wrong username costs the same as a wrong password.
        let user_ok = constant_time_eq(username, expected_user);
        let pass_ok = constant_time_eq(password, expected_pass);
        Ok(user_ok & pass_ok)
    }
}
