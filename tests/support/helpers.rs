// tests/support/helpers.rs
use super::mocks::{CapturingMailer, InMemoryContentRepo, TestClock};
use axum::{
    Router,
    body::{self, Body},
    http::{
        Method, Request, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::Response,
};
use chrono::Duration;
use folio_core::application::{
    ports::{
        mailer::Mailer,
        security::{CredentialVerifier, SessionSigner, TokenManager},
        time::Clock,
    },
    services::{ApplicationServices, ServiceSettings},
};
use folio_core::domain::content::{ContentReadRepository, ContentWriteRepository, SlugIndex};
use folio_core::infrastructure::security::{
    credentials::StaticCredentials, session::HmacSessionSigner, token::JwtTokenManager,
};
use folio_core::presentation::http::{
    routes::build_router_with_rate_limiter,
    state::{CookieSettings, HttpState},
};
use serde_json::Value;
use std::sync::Arc;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse";
pub const TEST_SECRET: &str = "integration-test-secret";
pub const CONTACT_INBOX: &str = "owner@example.com";

/// Everything a test might want to poke at behind the router.
pub struct TestApp {
    pub router: Router,
    pub services: Arc<ApplicationServices>,
    pub repo: Arc<InMemoryContentRepo>,
    pub mailer: Arc<CapturingMailer>,
    pub clock: Arc<TestClock>,
}

pub fn build_services(
    repo: &Arc<InMemoryContentRepo>,
    mailer: &Arc<CapturingMailer>,
    clock: &Arc<TestClock>,
    contact_recipient: Option<&str>,
) -> ApplicationServices {
    let clock_port: Arc<dyn Clock> = clock.clone();
    let write_repo: Arc<dyn ContentWriteRepository> = repo.clone();
    let read_repo: Arc<dyn ContentReadRepository> = repo.clone();
    let slug_index: Arc<dyn SlugIndex> = repo.clone();
    let credentials: Arc<dyn CredentialVerifier> = Arc::new(StaticCredentials::new(
        Some(ADMIN_USERNAME.into()),
        Some(ADMIN_PASSWORD.into()),
    ));
    let token_manager: Arc<dyn TokenManager> = Arc::new(JwtTokenManager::new(
        TEST_SECRET,
        Duration::days(7),
        Arc::clone(&clock_port),
    ));
    let session_signer: Arc<dyn SessionSigner> = Arc::new(HmacSessionSigner::new(
        TEST_SECRET,
        Duration::days(7),
        Arc::clone(&clock_port),
    ));
    let mailer_port: Arc<dyn Mailer> = mailer.clone();

    ApplicationServices::new(
        write_repo,
        read_repo,
        slug_index,
        credentials,
        token_manager,
        session_signer,
        mailer_port,
        clock_port,
        ServiceSettings {
            login_failure_delay: std::time::Duration::ZERO,
            contact_recipient: contact_recipient.map(str::to_owned),
        },
    )
}

pub fn make_test_app() -> TestApp {
    make_test_app_with_recipient(Some(CONTACT_INBOX))
}

pub fn make_test_app_with_recipient(contact_recipient: Option<&str>) -> TestApp {
    build_test_app(contact_recipient, false)
}

/// Keys throttles on `x-forwarded-for`, as when deployed behind a proxy.
pub fn make_test_app_behind_proxy() -> TestApp {
    build_test_app(Some(CONTACT_INBOX), true)
}

fn build_test_app(contact_recipient: Option<&str>, trust_proxy_headers: bool) -> TestApp {
    let repo = Arc::new(InMemoryContentRepo::default());
    let mailer = Arc::new(CapturingMailer::default());
    let clock = Arc::new(TestClock::default());
    let services = Arc::new(build_services(&repo, &mailer, &clock, contact_recipient));

    let state = HttpState {
        services: Arc::clone(&services),
        cookies: CookieSettings::default(),
        trust_proxy_headers,
    };
    let router = build_router_with_rate_limiter(state, &[], false);

    TestApp {
        router,
        services,
        repo,
        mailer,
        clock,
    }
}

impl TestApp {
    /// A bearer token for the configured administrator.
    pub async fn admin_token(&self) -> String {
        self.services
            .token_manager()
            .issue(ADMIN_USERNAME)
            .await
            .expect("issue admin token")
            .token
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        use tower::util::ServiceExt as _;
        self.router.clone().oneshot(request).await.expect("router call")
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn authed(method: Method, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn json_post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_json(resp: Response) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).expect("expected a JSON body");
    (status, json)
}

/// Asserts the `{ ok: false, error }` shape used for every failure.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) {
    let ct = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_owned();
    let (status, json) = read_json(resp).await;
    assert_eq!(status, expected_status, "body: {json}");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    assert_eq!(json["ok"], Value::Bool(false));
    assert_eq!(json["error"].as_str().unwrap_or(""), expected_error);
}
