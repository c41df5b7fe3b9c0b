use super::ContactCommandService;
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::mailer::OutgoingEmail,
};
use chrono::{DateTime, Utc};

pub const MAX_MESSAGE_CHARS: usize = 1000;
const MIN_NAME_CHARS: usize = 2;

pub struct ContactCommand {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub client_ip: String,
}

/// Collects every problem with a submission; an empty list means valid.
pub fn validate_contact(
    name: Option<&str>,
    email: Option<&str>,
    message: Option<&str>,
) -> Vec<&'static str> {
    let mut errors = Vec::new();

    if name.map_or(0, |n| n.trim().chars().count()) < MIN_NAME_CHARS {
        errors.push("Name must be at least 2 characters long");
    }

    match email {
        None | Some("") => errors.push("Email is required"),
        Some(email) if !looks_like_email(email) => {
            errors.push("Please provide a valid email address");
        }
        Some(_) => {}
    }

    if message.is_some_and(|m| m.chars().count() > MAX_MESSAGE_CHARS) {
        errors.push("Message must be less than 1000 characters");
    }

    errors
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .rsplit_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn render_email(
    name: &str,
    email: &str,
    message: Option<&str>,
    received_at: DateTime<Utc>,
) -> (String, String) {
    let (subject, heading) = match message {
        Some(_) => (
            format!("New contact form message from {name}"),
            "New Contact Form Message",
        ),
        None => (
            format!("New mailing list signup from {name}"),
            "New Mailing List Signup",
        ),
    };

    let mut html = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h2 style=\"color: #1e293b;\">{heading}</h2>\
         <div style=\"background: #f8fafc; padding: 20px; border-radius: 8px; margin: 20px 0;\">\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>",
        escape_html(name),
        escape_html(email),
    );
    if let Some(message) = message {
        html.push_str(
            "<p><strong>Message:</strong></p>\
             <div style=\"background: white; padding: 15px; border-radius: 4px; margin-top: 10px; white-space: pre-wrap;\">",
        );
        html.push_str(&escape_html(message).replace('\n', "<br>"));
        html.push_str("</div>");
    }
    html.push_str(&format!(
        "<p style=\"margin-top: 15px; padding-top: 15px; border-top: 1px solid #e2e8f0;\">\
         <strong>Timestamp:</strong> {}</p></div></div>",
        received_at.format("%Y-%m-%d %H:%M:%S UTC"),
    ));

    (subject, html)
}

impl ContactCommandService {
    pub async fn send(&self, command: ContactCommand) -> ApplicationResult<()> {
        let ContactCommand {
            name,
            email,
            message,
            client_ip,
        } = command;

        if !self.throttle.check(&client_ip) {
            tracing::warn!(client = %client_ip, "contact form throttled");
            return Err(ApplicationError::too_many_requests(
                "Too many requests. Please try again later.",
                None,
            ));
        }

        let errors = validate_contact(name.as_deref(), email.as_deref(), message.as_deref());
        if !errors.is_empty() {
            return Err(ApplicationError::validation(errors.join(", ")));
        }

        let recipient = self.recipient.clone().ok_or_else(|| {
            tracing::error!("contact recipient is not configured");
            ApplicationError::infrastructure(
                "Email service not configured. Please contact the administrator.",
            )
        })?;

        let name = name.unwrap_or_default();
        let email = email.unwrap_or_default();
        let message = message.as_deref().map(str::trim).filter(|m| !m.is_empty());
        let (subject, html) =
            render_email(name.trim(), email.trim(), message, self.clock.now());

        self.mailer
            .send(OutgoingEmail {
                to: vec![recipient],
                subject,
                html,
            })
            .await?;

        tracing::info!(client = %client_ip, "contact message sent");
        Ok(())
    }
}
