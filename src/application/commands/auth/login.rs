use super::AuthCommandService;
use crate::application::{
    dto::LoginOutcome,
    error::{ApplicationError, ApplicationResult},
    throttle::LoginDecision,
};

pub struct LoginCommand {
    pub username: Option<String>,
    pub password: Option<String>,
    pub client_ip: String,
}

impl AuthCommandService {
    pub async fn login(&self, command: LoginCommand) -> ApplicationResult<LoginOutcome> {
        let LoginCommand {
            username,
            password,
            client_ip,
        } = command;

        if let LoginDecision::Denied { retry_after } = self.throttle.check(&client_ip) {
            tracing::warn!(client = %client_ip, "login throttled");
            return Err(ApplicationError::too_many_requests(
                "Too many login attempts. Please try again later.",
                retry_after.to_std().ok().filter(|d| !d.is_zero()),
            ));
        }

        let (Some(username), Some(password)) = (
            username.filter(|u| !u.is_empty()),
            password.filter(|p| !p.is_empty()),
        ) else {
            self.throttle.record_failure(&client_ip);
            return Err(ApplicationError::validation(
                "Username and password are required",
            ));
        };

        if !self.credentials.verify(&username, &password)? {
            self.throttle.record_failure(&client_ip);
            tracing::warn!(client = %client_ip, "rejected admin login");
            if !self.failure_delay.is_zero() {
                tokio::time::sleep(self.failure_delay).await;
            }
            return Err(ApplicationError::unauthorized(
                "Invalid username or password",
            ));
        }

        self.throttle.reset(&client_ip);
        let token = self.token_manager.issue(&username).await?;
        let session = self.session_signer.sign(&username)?;
        tracing::info!(username = %username, "admin logged in");

        Ok(LoginOutcome {
            username,
            token,
            session,
        })
    }
}
