//! Customer Notifier
//!
//! Best-effort delivery of human-readable order-event messages. The
//! ledger dispatches only after its own write has succeeded, and a
//! delivery failure is logged and dropped; it never becomes the
//! operation's result.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Outbound notification seam. At-most-once, no acknowledgment.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

/// Default sink: structured log line only.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        tracing::info!(target: "customer_notify", "{message}");
        Ok(())
    }
}

/// POSTs `{"message": ...}` to a configured webhook endpoint.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        self.client
            .post(&self.url)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;
        Ok(())
    }
}
