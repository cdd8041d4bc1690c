use anyhow::Result;
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::config::{APP_CONFIG, RESET_TOKEN_LENGTH};
use crate::entities::{otp_secret, reset_token};
use crate::error::ServiceError;
use crate::redis_service::OtpRedisService;
use crate::static_service::DATABASE_CONNECTION;
use crate::utils::otp;
use crate::utils::random::generate_random_string;

pub struct OtpRepository;

impl OtpRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    /// Issue a fresh code for the identifier. Prior secrets are deleted so at
    /// most one secret is live per identifier.
    pub async fn issue_code(&self, identifier: &str) -> Result<String, ServiceError> {
        let db = self.get_connection();

        otp_secret::Entity::delete_many()
            .filter(otp_secret::Column::Identifier.eq(identifier))
            .exec(db)
            .await?;

        let secret = otp::generate_secret();
        let code = otp::generate_code(&secret, APP_CONFIG.otp_step_seconds)
            .map_err(ServiceError::Internal)?;

        let now = Utc::now().naive_utc();
        let model = otp_secret::ActiveModel {
            otp_id: Set(Uuid::new_v4()),
            identifier: Set(identifier.to_string()),
            secret: Set(secret),
            created_at: Set(now),
            expires_at: Set(now + Duration::seconds(APP_CONFIG.otp_step_seconds as i64)),
        };
        model.insert(db).await?;

        Ok(code)
    }

    /// Verify a code against the newest non-expired secret. The secret is
    /// kept on success: the step-aligned code stays valid for the remainder
    /// of its window. Failed attempts count toward a lockout.
    pub async fn verify_code(&self, identifier: &str, code: &str) -> Result<bool, ServiceError> {
        let mut attempts = OtpRedisService::get_attempts(identifier)
            .await
            .map_err(ServiceError::Internal)?;
        if attempts.is_locked() {
            tracing::warn!("OTP verification locked out for {}", identifier);
            return Ok(false);
        }

        let db = self.get_connection();
        let now = Utc::now().naive_utc();
        let secret = otp_secret::Entity::find()
            .filter(otp_secret::Column::Identifier.eq(identifier))
            .filter(otp_secret::Column::ExpiresAt.gt(now))
            .order_by_desc(otp_secret::Column::CreatedAt)
            .limit(1)
            .one(db)
            .await?;

        let valid = match secret {
            Some(secret) => otp::verify_code(&secret.secret, APP_CONFIG.otp_step_seconds, code),
            None => false,
        };

        if valid {
            OtpRedisService::reset_attempts(identifier)
                .await
                .map_err(ServiceError::Internal)?;
            self.sweep_expired().await;
        } else {
            attempts.increment_fail();
            OtpRedisService::set_attempts(identifier, &attempts)
                .await
                .map_err(ServiceError::Internal)?;
        }

        Ok(valid)
    }

    /// Mint a reset token for a verified identifier; prior tokens die first.
    pub async fn create_reset_token(
        &self,
        identifier: &str,
    ) -> Result<reset_token::Model, ServiceError> {
        let db = self.get_connection();

        reset_token::Entity::delete_many()
            .filter(reset_token::Column::Identifier.eq(identifier))
            .exec(db)
            .await?;

        let now = Utc::now().naive_utc();
        let model = reset_token::ActiveModel {
            token_id: Set(Uuid::new_v4()),
            token: Set(generate_random_string(RESET_TOKEN_LENGTH)),
            identifier: Set(identifier.to_string()),
            created_at: Set(now),
            expires_at: Set(now + Duration::seconds(APP_CONFIG.reset_token_ttl_seconds as i64)),
        };

        let result = model.insert(db).await?;
        Ok(result)
    }

    /// Validate and burn a reset token. A missing or replayed token reads as
    /// expired; a live token bound to a different identifier is a mismatch.
    pub async fn consume_reset_token(
        &self,
        token: &str,
        identifier: &str,
    ) -> Result<(), ServiceError> {
        let db = self.get_connection();
        let row = reset_token::Entity::find()
            .filter(reset_token::Column::Token.eq(token))
            .one(db)
            .await?
            .ok_or(ServiceError::TokenExpired)?;

        let now = Utc::now().naive_utc();
        if row.expires_at <= now {
            reset_token::Entity::delete_by_id(row.token_id).exec(db).await?;
            return Err(ServiceError::TokenExpired);
        }
        if row.identifier != identifier {
            return Err(ServiceError::TokenMismatch);
        }

        reset_token::Entity::delete_by_id(row.token_id).exec(db).await?;
        Ok(())
    }

    /// Opportunistic cleanup after successful verifications.
    async fn sweep_expired(&self) {
        let db = self.get_connection();
        let now = Utc::now().naive_utc();

        let secrets = otp_secret::Entity::delete_many()
            .filter(otp_secret::Column::ExpiresAt.lt(now))
            .exec(db)
            .await;
        let tokens = reset_token::Entity::delete_many()
            .filter(reset_token::Column::ExpiresAt.lt(now))
            .exec(db)
            .await;

        match (secrets, tokens) {
            (Ok(s), Ok(t)) => {
                if s.rows_affected > 0 || t.rows_affected > 0 {
                    tracing::info!(
                        "cleaned up {} expired OTP secrets and {} expired reset tokens",
                        s.rows_affected,
                        t.rows_affected
                    );
                }
            }
            _ => tracing::warn!("failed to sweep expired OTP state"),
        }
    }
}
