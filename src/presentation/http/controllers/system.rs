// src/presentation/http/controllers/system.rs
use crate::presentation::http::{
    controllers::{ok_envelope, to_value},
    error::{HttpResult, IntoHttpResult},
    extractors::AdminSession,
    state::HttpState,
};
use axum::{Extension, Json};
use serde_json::Value;

pub async fn health() -> Json<Value> {
    ok_envelope([("status", Value::String("healthy".into()))])
}

pub async fn check_tables(
    Extension(state): Extension<HttpState>,
    AdminSession(_admin): AdminSession,
) -> HttpResult<Json<Value>> {
    let status = state
        .services
        .content_queries
        .table_status()
        .await
        .into_http()?;
    Ok(ok_envelope([
        ("tables", to_value(&status.tables)?),
        ("allTablesExist", Value::Bool(status.all_tables_exist)),
    ]))
}
