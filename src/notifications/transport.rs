//! Push transport behind a trait so the fan-out can run against FCM or a
//! log-only sink (local development, tests).

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::config::APP_CONFIG;

#[derive(Debug, Clone)]
pub enum TransportError {
    /// Transport-level transient failure; retry is worthwhile.
    Transient(String),
    /// The token is no longer registered with the push service.
    Unregistered(String),
    /// The token is malformed or rejected outright.
    InvalidToken(String),
}

impl TransportError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportError::Transient(_))
    }

    pub fn reason(&self) -> &str {
        match self {
            TransportError::Transient(reason)
            | TransportError::Unregistered(reason)
            | TransportError::InvalidToken(reason) => reason,
        }
    }
}

#[async_trait]
pub trait NotificationTransport: Send + Sync {
    async fn send(&self, token: &str, title: &str, body: &str) -> Result<(), TransportError>;
}

/// Firebase Cloud Messaging over HTTP.
pub struct FcmTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl FcmTransport {
    pub fn new(endpoint: &str, project_id: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.replace("{project}", project_id),
        })
    }
}

#[async_trait]
impl NotificationTransport for FcmTransport {
    async fn send(&self, token: &str, title: &str, body: &str) -> Result<(), TransportError> {
        let payload = json!({
            "message": {
                "token": token,
                "notification": { "title": title, "body": body },
            }
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&APP_CONFIG.firebase_api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| TransportError::Transient(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        match status.as_u16() {
            404 | 410 => Err(TransportError::Unregistered(format!(
                "unregistered: {status}"
            ))),
            400 | 403 => Err(TransportError::InvalidToken(format!(
                "rejected: {status} {detail}"
            ))),
            _ => Err(TransportError::Transient(format!(
                "transient: {status} {detail}"
            ))),
        }
    }
}

/// Used when no Firebase project is configured: logs and reports success so
/// local flows keep working end to end.
pub struct LogTransport;

#[async_trait]
impl NotificationTransport for LogTransport {
    async fn send(&self, token: &str, title: &str, _body: &str) -> Result<(), TransportError> {
        tracing::info!(
            "push notification (log transport) token={}... title={}",
            &token[..token.len().min(12)],
            title
        );
        Ok(())
    }
}

pub static TRANSPORT: Lazy<Arc<dyn NotificationTransport>> = Lazy::new(|| {
    if APP_CONFIG.firebase_project_id.is_empty() {
        tracing::warn!("FIREBASE_PROJECT_ID not set; push notifications are log-only");
        Arc::new(LogTransport)
    } else {
        match FcmTransport::new(&APP_CONFIG.fcm_endpoint, &APP_CONFIG.firebase_project_id) {
            Ok(transport) => Arc::new(transport),
            Err(err) => {
                tracing::error!("Failed to build FCM transport: {}; falling back to log", err);
                Arc::new(LogTransport)
            }
        }
    }
});
