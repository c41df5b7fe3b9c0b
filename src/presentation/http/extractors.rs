// src/presentation/http/extractors.rs
use crate::{
    application::{dto::AdminIdentity, error::ApplicationError},
    presentation::http::state::HttpState,
};
use axum::{
    Extension, Json,
    extract::{ConnectInfo, FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use headers::{Authorization, Cookie, HeaderMapExt, authorization::Bearer};
use serde::de::DeserializeOwned;
use std::{convert::Infallible, net::SocketAddr};

use super::error::HttpError;

/// The authenticated administrator; rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct AdminSession(pub AdminIdentity);

/// Like [`AdminSession`] but never rejects.
#[derive(Debug, Clone)]
pub struct MaybeAdminSession(pub Option<AdminIdentity>);

/// Best-effort client address used to key the throttles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

/// `Json` whose rejections carry the usual error envelope.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(HttpError::from)
    }
}

async fn state_from<S: Send + Sync>(parts: &mut Parts, state: &S) -> Result<HttpState, HttpError> {
    Extension::<HttpState>::from_request_parts(parts, state)
        .await
        .map(|Extension(app_state)| app_state)
        .map_err(|_| {
            HttpError::from_error(ApplicationError::Infrastructure(
                "application state missing".into(),
            ))
        })
}

async fn resolve_admin(parts: &Parts, app_state: &HttpState) -> Result<AdminIdentity, HttpError> {
    let bearer = parts.headers.typed_get::<Authorization<Bearer>>();
    let cookies = parts.headers.typed_get::<Cookie>();
    let session = cookies
        .as_ref()
        .and_then(|c| c.get(app_state.cookies.name.as_str()));

    app_state
        .services
        .authenticate_admin(bearer.as_ref().map(|h| h.token()), session)
        .await
        .map_err(HttpError::from_error)
}

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = state_from(parts, state).await?;
        resolve_admin(parts, &app_state).await.map(Self)
    }
}

impl<S> FromRequestParts<S> for MaybeAdminSession
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = state_from(parts, state).await?;
        Ok(Self(resolve_admin(parts, &app_state).await.ok()))
    }
}

fn forwarded_for(parts: &Parts) -> Option<String> {
    let first_hop = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    };
    first_hop("x-forwarded-for").or_else(|| first_hop("x-real-ip"))
}

fn peer_addr(parts: &Parts) -> Option<String> {
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
}

/// Forwarded headers are client-controlled unless a proxy rewrites them,
/// so they are only consulted when `trust_proxy_headers` is set.
fn resolve_client_ip(parts: &Parts, trust_proxy_headers: bool) -> String {
    let forwarded = if trust_proxy_headers {
        forwarded_for(parts)
    } else {
        None
    };
    forwarded
        .or_else(|| peer_addr(parts))
        .unwrap_or_else(|| "unknown".to_owned())
}

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let trust = parts
            .extensions
            .get::<HttpState>()
            .is_some_and(|app_state| app_state.trust_proxy_headers);
        Ok(Self(resolve_client_ip(parts, trust)))
    }
}
