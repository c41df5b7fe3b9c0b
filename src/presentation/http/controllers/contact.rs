// src/presentation/http/controllers/contact.rs
use crate::application::commands::contact::ContactCommand;
use crate::presentation::http::{
    controllers::ok_only,
    error::{HttpResult, IntoHttpResult},
    extractors::{ClientIp, JsonBody},
    state::HttpState,
};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

pub async fn submit(
    Extension(state): Extension<HttpState>,
    ClientIp(client_ip): ClientIp,
    JsonBody(payload): JsonBody<ContactRequest>,
) -> HttpResult<Json<Value>> {
    state
        .services
        .contact_commands
        .send(ContactCommand {
            name: payload.name,
            email: payload.email,
            message: payload.message,
            client_ip,
        })
        .await
        .into_http()?;
    Ok(ok_only())
}
