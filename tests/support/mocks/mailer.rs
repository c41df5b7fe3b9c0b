// tests/support/mocks/mailer.rs
use async_trait::async_trait;
use folio_core::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::mailer::{Mailer, OutgoingEmail},
};
use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

/// Records every message instead of sending it.
#[derive(Debug, Default)]
pub struct CapturingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    failing: AtomicBool,
}

impl CapturingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_next_sends(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, email: OutgoingEmail) -> ApplicationResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApplicationError::infrastructure(
                "Failed to send email. Please try again later.",
            ));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}
