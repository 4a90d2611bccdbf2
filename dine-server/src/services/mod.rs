//! Background-facing services: customer notification and the rotating
//! registration verification code.

pub mod notifier;
pub mod verification;

pub use notifier::{LogNotifier, Notifier, NotifyError, WebhookNotifier};
pub use verification::VerificationCode;
