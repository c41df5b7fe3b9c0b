mod resend;

pub use resend::{RESEND_API_URL, ResendMailer};
