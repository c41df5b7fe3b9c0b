// src/application/services/mod.rs
use std::{sync::Arc, time::Duration};

use crate::{
    application::{
        commands::{
            auth::AuthCommandService, contact::ContactCommandService,
            content::ContentCommandService,
        },
        dto::AdminIdentity,
        error::ApplicationError,
        ports::{
            mailer::Mailer,
            security::{CredentialVerifier, SessionSigner, TokenManager},
            time::Clock,
        },
        queries::content::ContentQueryService,
        throttle::{ContactThrottle, LoginThrottle},
        ApplicationResult,
    },
    domain::content::{
        ContentReadRepository, ContentWriteRepository, SlugIndex, services::ContentSlugService,
    },
};

/// Knobs that are not ports.
#[derive(Debug, Clone, Default)]
pub struct ServiceSettings {
    /// Pause before answering a login with bad credentials.
    pub login_failure_delay: Duration,
    pub contact_recipient: Option<String>,
}

pub struct ApplicationServices {
    pub content_commands: Arc<ContentCommandService>,
    pub content_queries: Arc<ContentQueryService>,
    pub auth_commands: Arc<AuthCommandService>,
    pub contact_commands: Arc<ContactCommandService>,
    token_manager: Arc<dyn TokenManager>,
    session_signer: Arc<dyn SessionSigner>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        content_write_repo: Arc<dyn ContentWriteRepository>,
        content_read_repo: Arc<dyn ContentReadRepository>,
        slug_index: Arc<dyn SlugIndex>,
        credentials: Arc<dyn CredentialVerifier>,
        token_manager: Arc<dyn TokenManager>,
        session_signer: Arc<dyn SessionSigner>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
        settings: ServiceSettings,
    ) -> Self {
        let slug_service = Arc::new(ContentSlugService::new(slug_index));

        let content_commands = Arc::new(ContentCommandService::new(
            Arc::clone(&content_write_repo),
            Arc::clone(&content_read_repo),
            slug_service,
            Arc::clone(&clock),
        ));
        let content_queries = Arc::new(ContentQueryService::new(Arc::clone(&content_read_repo)));

        let auth_commands = Arc::new(AuthCommandService::new(
            credentials,
            Arc::clone(&token_manager),
            Arc::clone(&session_signer),
            Arc::new(LoginThrottle::new(Arc::clone(&clock))),
            settings.login_failure_delay,
        ));

        let contact_commands = Arc::new(ContactCommandService::new(
            mailer,
            Arc::new(ContactThrottle::new(Arc::clone(&clock))),
            clock,
            settings.contact_recipient,
        ));

        Self {
            content_commands,
            content_queries,
            auth_commands,
            contact_commands,
            token_manager,
            session_signer,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    pub fn session_signer(&self) -> Arc<dyn SessionSigner> {
        Arc::clone(&self.session_signer)
    }

    /// Resolves the administrator from a bearer token, falling back to the
    /// session cookie when the token is absent or does not verify.
    pub async fn authenticate_admin(
        &self,
        bearer: Option<&str>,
        session_cookie: Option<&str>,
    ) -> ApplicationResult<AdminIdentity> {
        if let Some(token) = bearer {
            match self.token_manager.authenticate(token).await {
                Ok(identity) => return Ok(identity),
                Err(err) => tracing::debug!(error = %err, "bearer token rejected"),
            }
        }

        session_cookie
            .and_then(|value| self.session_signer.verify(value))
            .ok_or_else(|| ApplicationError::unauthorized("Unauthorized"))
    }
}
