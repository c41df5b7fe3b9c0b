// tests/auth_and_contact.rs
use chrono::Duration;
use folio_core::application::{
    commands::{auth::LoginCommand, contact::ContactCommand},
    error::ApplicationError,
    services::ApplicationServices,
    throttle::CONTACT_MAX_REQUESTS,
};
use std::sync::Arc;

mod support;
use support::{
    ADMIN_PASSWORD, ADMIN_USERNAME, CONTACT_INBOX, CapturingMailer, InMemoryContentRepo,
    TestClock, build_services,
};

struct Fixture {
    services: ApplicationServices,
    mailer: Arc<CapturingMailer>,
    clock: Arc<TestClock>,
}

fn fixture_with_recipient(recipient: Option<&str>) -> Fixture {
    let mailer = Arc::new(CapturingMailer::default());
    let clock = Arc::new(TestClock::default());
    let services = build_services(
        &Arc::new(InMemoryContentRepo::default()),
        &mailer,
        &clock,
        recipient,
    );
    Fixture {
        services,
        mailer,
        clock,
    }
}

fn fixture() -> Fixture {
    fixture_with_recipient(Some(CONTACT_INBOX))
}

fn login(username: &str, password: &str) -> LoginCommand {
    LoginCommand {
        username: Some(username.into()),
        password: Some(password.into()),
        client_ip: "198.51.100.7".into(),
    }
}

fn contact(name: &str, email: &str, message: Option<&str>, ip: &str) -> ContactCommand {
    ContactCommand {
        name: Some(name.into()),
        email: Some(email.into()),
        message: message.map(str::to_owned),
        client_ip: ip.into(),
    }
}

#[tokio::test]
async fn login_issues_a_token_and_a_session() {
    let fx = fixture();
    let outcome = fx
        .services
        .auth_commands
        .login(login(ADMIN_USERNAME, ADMIN_PASSWORD))
        .await
        .unwrap();

    assert_eq!(outcome.username, ADMIN_USERNAME);
    assert_eq!(outcome.session.max_age, Duration::days(7));

    let via_token = fx
        .services
        .authenticate_admin(Some(&outcome.token.token), None)
        .await
        .unwrap();
    assert_eq!(via_token.username, ADMIN_USERNAME);

    let via_cookie = fx
        .services
        .authenticate_admin(Some("not-a-jwt"), Some(&outcome.session.value))
        .await
        .unwrap();
    assert_eq!(via_cookie.username, ADMIN_USERNAME);
}

#[tokio::test]
async fn blank_credentials_are_a_validation_error() {
    let fx = fixture();
    let err = fx
        .services
        .auth_commands
        .login(LoginCommand {
            username: Some(String::new()),
            password: None,
            client_ip: "ip".into(),
        })
        .await
        .unwrap_err();
    assert!(
        matches!(err, ApplicationError::Validation(ref msg) if msg == "Username and password are required")
    );
}

#[tokio::test]
async fn failed_login_backs_off_the_next_attempt() {
    let fx = fixture();
    let err = fx
        .services
        .auth_commands
        .login(login(ADMIN_USERNAME, "wrong"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, ApplicationError::Unauthorized(ref msg) if msg == "Invalid username or password")
    );

    let err = fx
        .services
        .auth_commands
        .login(login(ADMIN_USERNAME, ADMIN_PASSWORD))
        .await
        .unwrap_err();
    match err {
        ApplicationError::TooManyRequests { retry_after, .. } => {
            assert_eq!(retry_after, Some(std::time::Duration::from_secs(1)));
        }
        other => panic!("expected throttling, got {other:?}"),
    }

    fx.clock.advance(Duration::seconds(1));
    assert!(
        fx.services
            .auth_commands
            .login(login(ADMIN_USERNAME, ADMIN_PASSWORD))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn expired_credentials_are_rejected() {
    let fx = fixture();
    let outcome = fx
        .services
        .auth_commands
        .login(login(ADMIN_USERNAME, ADMIN_PASSWORD))
        .await
        .unwrap();

    fx.clock.advance(Duration::days(8));
    let err = fx
        .services
        .authenticate_admin(Some(&outcome.token.token), Some(&outcome.session.value))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Unauthorized(_)));
}

#[tokio::test]
async fn contact_message_is_mailed_to_the_owner() {
    let fx = fixture();
    fx.services
        .contact_commands
        .send(contact(
            "Ada",
            "ada@example.com",
            Some("Hello <there>\nsecond line"),
            "ip",
        ))
        .await
        .unwrap();

    let sent = fx.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, [CONTACT_INBOX]);
    assert_eq!(sent[0].subject, "New contact form message from Ada");
    assert!(sent[0].html.contains("Hello &lt;there&gt;<br>second line"));
    assert!(sent[0].html.contains("ada@example.com"));
}

#[tokio::test]
async fn signup_without_message_uses_mailing_list_subject() {
    let fx = fixture();
    fx.services
        .contact_commands
        .send(contact("Grace", "grace@example.org", None, "ip"))
        .await
        .unwrap();

    assert_eq!(
        fx.mailer.sent()[0].subject,
        "New mailing list signup from Grace"
    );
}

#[tokio::test]
async fn contact_validation_lists_every_problem() {
    let fx = fixture();
    let err = fx
        .services
        .contact_commands
        .send(contact("A", "not-an-email", None, "ip"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Validation(ref msg)
            if msg == "Name must be at least 2 characters long, Please provide a valid email address"
    ));
    assert!(fx.mailer.sent().is_empty());
}

#[tokio::test]
async fn contact_is_throttled_per_client() {
    let fx = fixture();
    for _ in 0..CONTACT_MAX_REQUESTS {
        fx.services
            .contact_commands
            .send(contact("Ada", "ada@example.com", None, "203.0.113.1"))
            .await
            .unwrap();
    }

    let err = fx
        .services
        .contact_commands
        .send(contact("Ada", "ada@example.com", None, "203.0.113.1"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::TooManyRequests { .. }));

    fx.services
        .contact_commands
        .send(contact("Ada", "ada@example.com", None, "203.0.113.2"))
        .await
        .unwrap();
}

#[tokio::test]
async fn contact_without_recipient_is_an_infrastructure_error() {
    let fx = fixture_with_recipient(None);
    let err = fx
        .services
        .contact_commands
        .send(contact("Ada", "ada@example.com", None, "ip"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Infrastructure(_)));
}
