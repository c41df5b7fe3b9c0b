use std::sync::Arc;

use crate::application::{
    ports::{mailer::Mailer, time::Clock},
    throttle::ContactThrottle,
};

pub struct ContactCommandService {
    pub(super) mailer: Arc<dyn Mailer>,
    pub(super) throttle: Arc<ContactThrottle>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) recipient: Option<String>,
}

impl ContactCommandService {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        throttle: Arc<ContactThrottle>,
        clock: Arc<dyn Clock>,
        recipient: Option<String>,
    ) -> Self {
        Self {
            mailer,
            throttle,
            clock,
            recipient,
        }
    }
}
