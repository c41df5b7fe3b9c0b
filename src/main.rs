use anyhow::Result;
use folio_core::application::{
    ports::{
        mailer::Mailer,
        security::{CredentialVerifier, SessionSigner, TokenManager},
        time::Clock,
    },
    services::{ApplicationServices, ServiceSettings},
};
use folio_core::config::AppConfig;
use folio_core::domain::content::{ContentReadRepository, ContentWriteRepository, SlugIndex};
use folio_core::infrastructure::{
    database,
    mail::ResendMailer,
    repositories::PostgresContentRepository,
    security::{
        credentials::StaticCredentials, session::HmacSessionSigner, token::JwtTokenManager,
    },
    time::SystemClock,
};
use folio_core::presentation::http::{
    routes::build_router_with_rate_limiter,
    state::{CookieSettings, HttpState},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url(), config.database_max_connections()).await?;
    let content_repo = Arc::new(PostgresContentRepository::new(pool));
    let content_write_repo: Arc<dyn ContentWriteRepository> = content_repo.clone();
    let content_read_repo: Arc<dyn ContentReadRepository> = content_repo.clone();
    let slug_index: Arc<dyn SlugIndex> = content_repo;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let token_manager: Arc<dyn TokenManager> = Arc::new(JwtTokenManager::new(
        config.auth_secret(),
        config.session_ttl(),
        Arc::clone(&clock),
    ));
    let session_signer: Arc<dyn SessionSigner> = Arc::new(HmacSessionSigner::new(
        config.auth_secret(),
        config.session_ttl(),
        Arc::clone(&clock),
    ));
    let credentials: Arc<dyn CredentialVerifier> = Arc::new(StaticCredentials::new(
        config.auth_username().map(str::to_owned),
        config.auth_password().map(str::to_owned),
    ));
    if config.auth_username().is_none() || config.auth_password().is_none() {
        tracing::warn!("AUTH_USERNAME/AUTH_PASSWORD not set, admin login is disabled");
    }
    let mailer: Arc<dyn Mailer> = Arc::new(ResendMailer::new(
        config.resend_api_key().map(str::to_owned),
        config.resend_from_email(),
        config.resend_from_name(),
    ));

    let services = Arc::new(ApplicationServices::new(
        content_write_repo,
        content_read_repo,
        slug_index,
        credentials,
        token_manager,
        session_signer,
        mailer,
        clock,
        ServiceSettings {
            login_failure_delay: config.login_failure_delay(),
            contact_recipient: config.contact_recipient().map(str::to_owned),
        },
    ));

    let state = HttpState {
        services,
        cookies: CookieSettings {
            name: config.auth_cookie_name().to_owned(),
            secure: config.is_production(),
        },
        trust_proxy_headers: config.trust_proxy_headers(),
    };

    let app = build_router_with_rate_limiter(
        state,
        config.allowed_origins(),
        config.rate_limit_enabled(),
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
