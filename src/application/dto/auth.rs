use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokenDto {
    pub token: String,
    #[serde(with = "serde_time")]
    pub issued_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

/// The administrator behind a verified token or session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Signed session cookie value and how long the browser should keep it.
#[derive(Debug, Clone)]
pub struct SessionTicket {
    pub value: String,
    pub max_age: chrono::Duration,
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub username: String,
    pub token: AuthTokenDto,
    pub session: SessionTicket,
}
