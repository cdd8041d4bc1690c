//! Best-effort push notification fan-out.
//!
//! The sink owns quota and retries; callers fire it after their transaction
//! commits and never let a delivery failure abort the business action.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use once_cell::sync::Lazy;

use crate::config::APP_CONFIG;
use crate::notifications::transport::{TRANSPORT, TransportError};
use crate::repositories::DeviceTokenRepository;

const FALLBACK_PREFIXES: [&str; 2] = ["fcm-token-", "fallback-token-"];

/// Tokens carrying a recognised non-deliverable prefix are counted as
/// pseudo-successes and never transmitted.
pub fn is_fallback_token(token: &str) -> bool {
    FALLBACK_PREFIXES
        .iter()
        .any(|prefix| token.starts_with(prefix))
}

/// Exponential backoff for retry `attempt` (1-based), clamped to the
/// configured window.
pub fn backoff_delay(attempt: u32, min_wait: Duration, max_wait: Duration) -> Duration {
    let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
    min_wait.saturating_mul(factor).min(max_wait)
}

static QUOTA: Lazy<DefaultDirectRateLimiter> = Lazy::new(|| {
    let per_minute =
        NonZeroU32::new(APP_CONFIG.notification_quota_per_minute).unwrap_or(nonzero!(500u32));
    RateLimiter::direct(Quota::per_minute(per_minute))
});

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub success_count: usize,
    pub failure_count: usize,
    pub failed_tokens: Vec<String>,
}

/// Multicast (title, body) to the given device tokens.
///
/// Unknown or inactive tokens count as failures; fallback-shaped tokens count
/// as successes without transmission. Permanent transport failures deactivate
/// the token. Returns (success, failure, failed tokens) semantics as a
/// [`DispatchOutcome`].
pub async fn send_push_notification(
    title: &str,
    body: &str,
    tokens: Vec<String>,
) -> DispatchOutcome {
    let mut outcome = DispatchOutcome::default();
    if tokens.is_empty() {
        return outcome;
    }

    let device_repo = DeviceTokenRepository::new();
    let devices = match device_repo.find_active_by_tokens(&tokens).await {
        Ok(devices) => devices,
        Err(err) => {
            tracing::error!("Failed to load device tokens for fan-out: {}", err);
            outcome.failure_count = tokens.len();
            outcome.failed_tokens = tokens;
            return outcome;
        }
    };

    // Tokens not present as active devices are counted as failures up front.
    for token in &tokens {
        if !devices.iter().any(|device| &device.token == token) {
            outcome.failure_count += 1;
            outcome.failed_tokens.push(token.clone());
        }
    }

    let min_wait = Duration::from_secs(APP_CONFIG.notification_retry_min_wait_seconds);
    let max_wait = Duration::from_secs(APP_CONFIG.notification_retry_max_wait_seconds);
    let attempts = APP_CONFIG.notification_retry_attempts.max(1);

    for device in devices {
        if device.is_fallback || is_fallback_token(&device.token) {
            outcome.success_count += 1;
            continue;
        }

        if QUOTA.check().is_err() {
            // Quota window exhausted: the rest of this call short-circuits.
            outcome.failure_count += 1;
            outcome.failed_tokens.push(device.token.clone());
            continue;
        }

        match transmit_with_retry(&device.token, title, body, attempts, min_wait, max_wait).await
        {
            Ok(()) => outcome.success_count += 1,
            Err(err) => {
                if !err.is_retryable() {
                    if let Err(db_err) = device_repo
                        .deactivate(&device.token, err.reason())
                        .await
                    {
                        tracing::error!(
                            "Failed to deactivate token {}...: {}",
                            &device.token[..device.token.len().min(12)],
                            db_err
                        );
                    }
                }
                outcome.failure_count += 1;
                outcome.failed_tokens.push(device.token.clone());
            }
        }
    }

    tracing::info!(
        "push fan-out '{}': {} sent, {} failed",
        title,
        outcome.success_count,
        outcome.failure_count
    );
    outcome
}

async fn transmit_with_retry(
    token: &str,
    title: &str,
    body: &str,
    attempts: u32,
    min_wait: Duration,
    max_wait: Duration,
) -> Result<(), TransportError> {
    let mut last_err = TransportError::Transient("no attempt made".to_string());
    for attempt in 1..=attempts {
        match TRANSPORT.send(token, title, body).await {
            Ok(()) => return Ok(()),
            Err(err) => {
                if !err.is_retryable() {
                    return Err(err);
                }
                last_err = err;
                if attempt < attempts {
                    tokio::time::sleep(backoff_delay(attempt, min_wait, max_wait)).await;
                }
            }
        }
    }
    Err(last_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_prefixes_are_recognised() {
        assert!(is_fallback_token("fcm-token-abc123"));
        assert!(is_fallback_token("fallback-token-xyz"));
        assert!(!is_fallback_token("dXJ2aWNlcy5nb29nbGU"));
        assert!(!is_fallback_token("token-fcm-reversed"));
    }

    #[test]
    fn backoff_doubles_and_clamps() {
        let min = Duration::from_secs(4);
        let max = Duration::from_secs(10);
        assert_eq!(backoff_delay(1, min, max), Duration::from_secs(4));
        assert_eq!(backoff_delay(2, min, max), Duration::from_secs(8));
        assert_eq!(backoff_delay(3, min, max), Duration::from_secs(10));
        assert_eq!(backoff_delay(8, min, max), Duration::from_secs(10));
    }

    #[test]
    fn retryability_follows_error_kind() {
        assert!(TransportError::Transient("503".into()).is_retryable());
        assert!(!TransportError::Unregistered("gone".into()).is_retryable());
        assert!(!TransportError::InvalidToken("bad".into()).is_retryable());
    }
}
