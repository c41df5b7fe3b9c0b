// src/infrastructure/security/session.rs
//! Session cookie: `base64url(json).base64url(hmac_sha256(json))`.
use crate::application::{
    dto::{AdminIdentity, SessionTicket},
    error::{ApplicationError, ApplicationResult},
    ports::{security::SessionSigner, time::Clock},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

/// Millisecond timestamps, matching cookies issued by earlier deployments.
#[derive(Debug, Serialize, Deserialize)]
struct SessionPayload {
    u: String,
    iat: i64,
    exp: i64,
}

pub struct HmacSessionSigner {
    secret: Vec<u8>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl HmacSessionSigner {
    pub fn new(secret: &str, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl,
            clock,
        }
    }

    fn mac(&self) -> ApplicationResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))
    }

    fn decode(&self, value: &str) -> Option<SessionPayload> {
        let (encoded, signature) = value.split_once('.')?;
        let data = URL_SAFE_NO_PAD.decode(encoded).ok()?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac().ok()?;
        mac.update(&data);
        mac.verify_slice(&signature).ok()?;

        serde_json::from_slice(&data).ok()
    }
}

impl SessionSigner for HmacSessionSigner {
    fn sign(&self, username: &str) -> ApplicationResult<SessionTicket> {
        let now = self.clock.now();
        let payload = SessionPayload {
            u: username.to_owned(),
            iat: now.timestamp_millis(),
            exp: (now + self.ttl).timestamp_millis(),
        };
        let data = serde_json::to_vec(&payload)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        let mut mac = self.mac()?;
        mac.update(&data);
        let signature = mac.finalize().into_bytes();

        Ok(SessionTicket {
            value: format!(
                "{}.{}",
                URL_SAFE_NO_PAD.encode(&data),
                URL_SAFE_NO_PAD.encode(signature)
            ),
            max_age: self.ttl,
        })
    }

    fn verify(&self, value: &str) -> Option<AdminIdentity> {
        let payload = self.decode(value)?;
        if payload.u.is_empty() || payload.exp < self.clock.now().timestamp_millis() {
            return None;
        }

        Some(AdminIdentity {
            username: payload.u,
            issued_at: DateTime::from_timestamp_millis(payload.iat)?,
            expires_at: DateTime::from_timestamp_millis(payload.exp)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    struct StepClock(Mutex<DateTime<Utc>>);

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn signer() -> (HmacSessionSigner, Arc<StepClock>) {
        let clock = Arc::new(StepClock(Mutex::new(
            Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap(),
        )));
        (
            HmacSessionSigner::new("cookie-secret", Duration::days(7), clock.clone()),
            clock,
        )
    }

    #[test]
    fn signed_cookie_round_trips() {
        let (signer, _) = signer();
        let ticket = signer.sign("admin").unwrap();
        assert_eq!(ticket.max_age, Duration::days(7));

        let identity = signer.verify(&ticket.value).unwrap();
        assert_eq!(identity.username, "admin");
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let (signer, _) = signer();
        let ticket = signer.sign("admin").unwrap();
        let (_, signature) = ticket.value.split_once('.').unwrap();

        let forged = URL_SAFE_NO_PAD.encode(br#"{"u":"mallory","iat":0,"exp":99999999999999}"#);
        assert!(signer.verify(&format!("{forged}.{signature}")).is_none());
        assert!(signer.verify("garbage").is_none());
        assert!(signer.verify("a.b").is_none());
    }

    #[test]
    fn expired_cookie_is_rejected() {
        let (signer, clock) = signer();
        let ticket = signer.sign("admin").unwrap();
        *clock.0.lock().unwrap() += Duration::days(8);
        assert!(signer.verify(&ticket.value).is_none());
    }
}
