// src/presentation/http/controllers/auth.rs
use crate::application::{commands::auth::LoginCommand, dto::SessionTicket};
use crate::presentation::http::{
    controllers::{ok_envelope, ok_only},
    error::{HttpResult, IntoHttpResult},
    extractors::{ClientIp, JsonBody, MaybeAdminSession},
    state::{CookieSettings, HttpState},
};
use axum::{
    Extension, Json,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

fn session_cookie(settings: &CookieSettings, ticket: &SessionTicket) -> String {
    build_cookie(settings, &ticket.value, ticket.max_age.num_seconds().max(0))
}

fn expired_cookie(settings: &CookieSettings) -> String {
    build_cookie(settings, "", 0)
}

fn build_cookie(settings: &CookieSettings, value: &str, max_age_secs: i64) -> String {
    let mut cookie = format!(
        "{}={value}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_secs}",
        settings.name
    );
    if settings.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub async fn login(
    Extension(state): Extension<HttpState>,
    ClientIp(client_ip): ClientIp,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> HttpResult<impl IntoResponse> {
    let outcome = state
        .services
        .auth_commands
        .login(LoginCommand {
            username: payload.username,
            password: payload.password,
            client_ip,
        })
        .await
        .into_http()?;

    let cookie = session_cookie(&state.cookies, &outcome.session);
    let body = ok_envelope([
        ("token", Value::String(outcome.token.token)),
        ("username", Value::String(outcome.username)),
    ]);
    Ok(([(SET_COOKIE, cookie)], body))
}

pub async fn logout(Extension(state): Extension<HttpState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, expired_cookie(&state.cookies))],
        ok_only(),
    )
}

pub async fn check(MaybeAdminSession(admin): MaybeAdminSession) -> Response {
    match admin {
        Some(identity) => ok_envelope([
            ("authenticated", Value::Bool(true)),
            ("username", Value::String(identity.username)),
        ])
        .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "ok": false,
                "authenticated": false,
                "error": "Unauthorized",
            })),
        )
            .into_response(),
    }
}
