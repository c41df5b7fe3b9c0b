use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::mailer::{Mailer, OutgoingEmail},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const RESEND_API_URL: &str = "https://api.resend.com/emails";
const GENERIC_FAILURE: &str = "Failed to send email. Please try again later.";

#[derive(Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct ResendErrorBody {
    message: Option<String>,
}

/// Sends mail through the Resend HTTP API.
pub struct ResendMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    from: String,
}

impl ResendMailer {
    pub fn new(api_key: Option<String>, from_email: &str, from_name: Option<&str>) -> Self {
        let from = match from_name.filter(|n| !n.trim().is_empty()) {
            Some(name) => format!("{} <{from_email}>", name.trim()),
            None => from_email.to_owned(),
        };
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: RESEND_API_URL.to_owned(),
            api_key,
            from,
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn from_address(&self) -> &str {
        &self.from
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: OutgoingEmail) -> ApplicationResult<()> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::error!("RESEND_API_KEY is not set");
            return Err(ApplicationError::infrastructure(
                "Email service not configured. Please contact the administrator.",
            ));
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&ResendRequest {
                from: &self.from,
                to: &email.to,
                subject: &email.subject,
                html: &email.html,
            })
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "mail API unreachable");
                ApplicationError::infrastructure(GENERIC_FAILURE)
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = %status, body = %body, from = %self.from, "mail API rejected message");
        let message = serde_json::from_str::<ResendErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| GENERIC_FAILURE.to_owned());
        Err(ApplicationError::infrastructure(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_includes_display_name_when_present() {
        let named = ResendMailer::new(None, "site@example.com", Some(" Site "));
        assert_eq!(named.from_address(), "Site <site@example.com>");

        let bare = ResendMailer::new(None, "site@example.com", None);
        assert_eq!(bare.from_address(), "site@example.com");
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let mailer = ResendMailer::new(None, "site@example.com", None)
            .with_endpoint("http://127.0.0.1:9/unreachable");
        let err = mailer
            .send(OutgoingEmail {
                to: vec!["me@example.com".into()],
                subject: "s".into(),
                html: "h".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Infrastructure(msg) if msg.contains("not configured")));
    }
}
