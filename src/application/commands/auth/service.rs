use std::{sync::Arc, time::Duration};

use crate::application::{
    ports::security::{CredentialVerifier, SessionSigner, TokenManager},
    throttle::LoginThrottle,
};

pub struct AuthCommandService {
    pub(super) credentials: Arc<dyn CredentialVerifier>,
    pub(super) token_manager: Arc<dyn TokenManager>,
    pub(super) session_signer: Arc<dyn SessionSigner>,
    pub(super) throttle: Arc<LoginThrottle>,
    pub(super) failure_delay: Duration,
}

impl AuthCommandService {
    pub fn new(
        credentials: Arc<dyn CredentialVerifier>,
        token_manager: Arc<dyn TokenManager>,
        session_signer: Arc<dyn SessionSigner>,
        throttle: Arc<LoginThrottle>,
        failure_delay: Duration,
    ) -> Self {
        Self {
            credentials,
            token_manager,
            session_signer,
            throttle,
            failure_delay,
        }
    }
}
