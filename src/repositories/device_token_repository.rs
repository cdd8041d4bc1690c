use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::device_token;
use crate::entities::sea_orm_active_enums::DeviceUserType;
use crate::static_service::DATABASE_CONNECTION;

pub struct DeviceTokenRepository;

impl DeviceTokenRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    /// Register-or-refresh keyed by the token value. Re-registration
    /// reactivates and re-stamps the token.
    pub async fn register(
        &self,
        token: &str,
        principal_id: Option<Uuid>,
        user_type: DeviceUserType,
    ) -> Result<device_token::Model> {
        let db = self.get_connection();
        let is_fallback = crate::notifications::fanout::is_fallback_token(token);
        let now = Utc::now().naive_utc();

        let existing = device_token::Entity::find()
            .filter(device_token::Column::Token.eq(token))
            .one(db)
            .await?;

        let result = match existing {
            Some(device) => {
                let mut model: device_token::ActiveModel = device.into();
                model.principal_id = Set(principal_id);
                model.user_type = Set(user_type);
                model.is_active = Set(true);
                model.is_fallback = Set(is_fallback);
                model.last_active = Set(now);
                model.update(db).await?
            }
            None => {
                let model = device_token::ActiveModel {
                    device_id: Set(Uuid::new_v4()),
                    token: Set(token.to_string()),
                    principal_id: Set(principal_id),
                    user_type: Set(user_type),
                    is_active: Set(true),
                    is_fallback: Set(is_fallback),
                    last_active: Set(now),
                    created_at: Set(now),
                };
                model.insert(db).await?
            }
        };

        Ok(result)
    }

    pub async fn find_active_by_tokens(
        &self,
        tokens: &[String],
    ) -> Result<Vec<device_token::Model>> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let db = self.get_connection();
        let devices = device_token::Entity::find()
            .filter(device_token::Column::Token.is_in(tokens.to_vec()))
            .filter(device_token::Column::IsActive.eq(true))
            .all(db)
            .await?;
        Ok(devices)
    }

    pub async fn all_active_tokens(&self) -> Result<Vec<String>> {
        let db = self.get_connection();
        let devices = device_token::Entity::find()
            .filter(device_token::Column::IsActive.eq(true))
            .all(db)
            .await?;
        Ok(devices.into_iter().map(|device| device.token).collect())
    }

    pub async fn active_tokens_for_user_types(
        &self,
        user_types: &[DeviceUserType],
    ) -> Result<Vec<String>> {
        let db = self.get_connection();
        let devices = device_token::Entity::find()
            .filter(device_token::Column::IsActive.eq(true))
            .filter(device_token::Column::UserType.is_in(user_types.to_vec()))
            .all(db)
            .await?;
        Ok(devices.into_iter().map(|device| device.token).collect())
    }

    /// Permanently failing tokens are deactivated, not deleted; the reason is
    /// logged for operators.
    pub async fn deactivate(&self, token: &str, reason: &str) -> Result<()> {
        let db = self.get_connection();
        let device = device_token::Entity::find()
            .filter(device_token::Column::Token.eq(token))
            .one(db)
            .await?;

        if let Some(device) = device {
            tracing::warn!(
                "deactivating device token {}...: {}",
                &token[..token.len().min(12)],
                reason
            );
            let mut model: device_token::ActiveModel = device.into();
            model.is_active = Set(false);
            model.last_active = Set(Utc::now().naive_utc());
            model.update(db).await?;
        }
        Ok(())
    }
}
