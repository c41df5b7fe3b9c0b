// src/presentation/http/routes.rs
use crate::domain::content::Collection;
use crate::presentation::http::{
    controllers::{auth, contact, content, system},
    middleware::rate_limit::{RateLimitSettings, rate_limit_layer},
    state::HttpState,
};
use axum::{
    Extension, Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    build_router_with_rate_limiter(state, allowed_origins, true)
}

pub fn build_router_with_rate_limiter(
    state: HttpState,
    allowed_origins: &[String],
    enable_rate_limiter: bool,
) -> Router {
    let router = Router::new()
        .route("/health", get(system::health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/check", get(auth::check))
        .route("/api/latest", get(content::latest))
        .route("/api/contact", post(contact::submit))
        .route("/api/admin/check-tables", get(system::check_tables))
        .merge(collection_routes(
            Collection::Blog,
            "/api/blog/posts",
            "/api/admin/blog/posts",
        ))
        .merge(collection_routes(
            Collection::Writing,
            "/api/writings",
            "/api/admin/writings",
        ));

    let limiter = if enable_rate_limiter {
        rate_limit_layer(RateLimitSettings::default())
    } else {
        None
    };
    let router = match limiter {
        Some(limiter) => router.layer(limiter),
        None => router,
    };

    router
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

/// Public and admin routes for one collection. The handlers are shared; the
/// collection reaches them as an extension.
fn collection_routes(collection: Collection, public_base: &str, admin_base: &str) -> Router {
    Router::new()
        .route(public_base, get(content::list_published))
        .route(&format!("{public_base}/{{slug}}"), get(content::get_published))
        .route(
            admin_base,
            get(content::admin_list).post(content::admin_create),
        )
        .route(
            &format!("{admin_base}/{{id}}"),
            get(content::admin_get)
                .put(content::admin_update)
                .delete(content::admin_delete),
        )
        .route(
            &format!("{admin_base}/{{id}}/duplicate"),
            post(content::admin_duplicate),
        )
        .layer(Extension(collection))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
