//! Notification sender adapters.

mod logging;
mod resend;

pub use logging::LoggingNotificationSender;
pub use resend::{ResendConfig, ResendNotificationSender};
