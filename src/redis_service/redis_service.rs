use anyhow::{Context, Result};
use chrono::Utc;
use once_cell::sync::Lazy;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{
    APP_CONFIG, COMPLETION_CACHE_TTL_SECONDS, JWT_EXPIRED_TIME, OTP_LOCK_DURATION_SECONDS,
    OTP_MAX_FAIL_ATTEMPTS,
};

pub static REDIS_CLIENT: Lazy<redis::Client> = Lazy::new(|| {
    redis::Client::open(APP_CONFIG.redis_url.as_str()).expect("Failed to create Redis client")
});

pub async fn init_redis_connection() -> Result<()> {
    let mut conn = REDIS_CLIENT
        .get_connection_manager()
        .await
        .context("Failed to get Redis connection")?;

    let _: String = redis::cmd("PING")
        .query_async(&mut conn)
        .await
        .context("Failed to ping Redis")?;

    Ok(())
}

pub async fn get_redis() -> Result<ConnectionManager> {
    REDIS_CLIENT
        .get_connection_manager()
        .await
        .context("Failed to get Redis connection")
}

fn prefixed(key: &str) -> String {
    format!("{}:{}", APP_CONFIG.redis_key_prefix, key)
}

// Failed password-reset attempts stored in Redis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpAttempts {
    pub identifier: String,
    pub invalid_count: u32,
    pub locked_until: Option<i64>, // Unix timestamp
}

impl OtpAttempts {
    pub fn is_locked(&self) -> bool {
        if let Some(locked_until) = self.locked_until {
            Utc::now().timestamp() < locked_until
        } else {
            false
        }
    }

    pub fn increment_fail(&mut self) {
        self.invalid_count += 1;
        if self.invalid_count >= OTP_MAX_FAIL_ATTEMPTS {
            self.locked_until = Some(Utc::now().timestamp() + OTP_LOCK_DURATION_SECONDS as i64);
        }
    }
}

pub struct OtpRedisService;

impl OtpRedisService {
    pub async fn get_attempts(identifier: &str) -> Result<OtpAttempts> {
        let default = OtpAttempts {
            identifier: identifier.to_string(),
            invalid_count: 0,
            locked_until: None,
        };
        if !APP_CONFIG.use_redis {
            return Ok(default);
        }

        let mut redis = get_redis().await?;
        let key = prefixed(&format!("otp:attempts:{}", identifier));

        match redis.get::<_, Option<String>>(&key).await? {
            Some(json) => {
                serde_json::from_str(&json).context("Failed to deserialize OTP attempts")
            }
            None => Ok(default),
        }
    }

    pub async fn set_attempts(identifier: &str, attempts: &OtpAttempts) -> Result<()> {
        if !APP_CONFIG.use_redis {
            return Ok(());
        }

        let mut redis = get_redis().await?;
        let key = prefixed(&format!("otp:attempts:{}", identifier));
        let json = serde_json::to_string(attempts).context("Failed to serialize OTP attempts")?;

        let _: () = redis.set_ex(&key, json, OTP_LOCK_DURATION_SECONDS).await?;
        Ok(())
    }

    pub async fn reset_attempts(identifier: &str) -> Result<()> {
        if !APP_CONFIG.use_redis {
            return Ok(());
        }

        let mut redis = get_redis().await?;
        let key = prefixed(&format!("otp:attempts:{}", identifier));
        let _: () = redis.del(&key).await?;
        Ok(())
    }
}

// Logged-out tokens stay blacklisted until they would expire anyway
pub struct JwtBlacklist;

impl JwtBlacklist {
    pub async fn add(token: &str) -> Result<()> {
        if !APP_CONFIG.use_redis {
            return Ok(());
        }

        let mut redis = get_redis().await?;
        let key = prefixed(&format!("jwt:blacklist:{}", token));
        let _: () = redis.set_ex(&key, 1, JWT_EXPIRED_TIME as u64).await?;
        Ok(())
    }

    pub async fn contains(token: &str) -> Result<bool> {
        if !APP_CONFIG.use_redis {
            return Ok(false);
        }

        let mut redis = get_redis().await?;
        let key = prefixed(&format!("jwt:blacklist:{}", token));
        let exists: bool = redis.exists(&key).await?;
        Ok(exists)
    }
}

// Hot cache for completion percentages; DB stays authoritative
pub struct CompletionCache;

impl CompletionCache {
    pub async fn get(tracking_id: Uuid) -> Result<Option<i32>> {
        if !APP_CONFIG.use_redis {
            return Ok(None);
        }

        let mut redis = get_redis().await?;
        let key = prefixed(&format!("tracking:completion:{}", tracking_id));
        let value: Option<i32> = redis.get(&key).await?;
        Ok(value)
    }

    pub async fn set(tracking_id: Uuid, percentage: i32) -> Result<()> {
        if !APP_CONFIG.use_redis {
            return Ok(());
        }

        let mut redis = get_redis().await?;
        let key = prefixed(&format!("tracking:completion:{}", tracking_id));
        let _: () = redis
            .set_ex(&key, percentage, COMPLETION_CACHE_TTL_SECONDS)
            .await?;
        Ok(())
    }
}
