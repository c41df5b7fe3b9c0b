// src/infrastructure/security/token.rs
use crate::application::{
    dto::{AdminIdentity, AuthTokenDto},
    error::{ApplicationError, ApplicationResult},
    ports::{security::TokenManager, time::Clock},
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    username: String,
    iat: i64,
    exp: i64,
}

/// HS256 bearer tokens signed with the shared auth secret.
pub struct JwtTokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenManager {
    pub fn new(secret: &str, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            clock,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::default();
        // `exp` is checked against the injected clock instead.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation
    }
}

fn timestamp(secs: i64) -> ApplicationResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| ApplicationError::unauthorized("Invalid or expired token"))
}

#[async_trait]
impl TokenManager for JwtTokenManager {
    async fn issue(&self, username: &str) -> ApplicationResult<AuthTokenDto> {
        let issued_at = self.clock.now();
        let expires_at = issued_at + self.ttl;
        let claims = Claims {
            username: username.to_owned(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        Ok(AuthTokenDto {
            token,
            issued_at,
            expires_at,
            expires_in: self.ttl.num_seconds(),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AdminIdentity> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation()).map_err(
            |err| match err.kind() {
                ErrorKind::ExpiredSignature => ApplicationError::unauthorized("token expired"),
                _ => ApplicationError::unauthorized("Invalid or expired token"),
            },
        )?;

        let claims = data.claims;
        if claims.exp <= self.clock.now().timestamp() {
            return Err(ApplicationError::unauthorized("token expired"));
        }

        Ok(AdminIdentity {
            username: claims.username,
            issued_at: timestamp(claims.iat)?,
            expires_at: timestamp(claims.exp)?,
        })
    }
}
