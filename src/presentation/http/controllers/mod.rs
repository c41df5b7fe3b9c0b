// src/presentation/http/controllers/mod.rs
pub mod auth;
pub mod contact;
pub mod content;
pub mod system;

use crate::{
    application::error::ApplicationError,
    presentation::http::error::{HttpError, HttpResult},
};
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

/// `{ "ok": true, ...fields }`
pub(super) fn ok_envelope(fields: impl IntoIterator<Item = (&'static str, Value)>) -> Json<Value> {
    let mut body = Map::new();
    body.insert("ok".into(), Value::Bool(true));
    for (key, value) in fields {
        body.insert(key.into(), value);
    }
    Json(Value::Object(body))
}

/// `{ "ok": true }`
pub(super) fn ok_only() -> Json<Value> {
    ok_envelope(Vec::new())
}

pub(super) fn to_value<T: Serialize>(value: &T) -> HttpResult<Value> {
    serde_json::to_value(value).map_err(|err| {
        HttpError::from_error(ApplicationError::infrastructure(format!(
            "failed to encode response: {err}"
        )))
    })
}
