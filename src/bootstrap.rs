use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::config::APP_CONFIG;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::principal;
use crate::repositories::InstituteRepository;

const DEFAULT_ADMIN_PHONE: &str = "9800000000";
const DEFAULT_ADMIN_PASSWORD: &str = "admin";
const DEFAULT_INSTITUTE_NAME: &str = "Institute";

/// Ensure the default admin principal and the institute row exist.
pub async fn initialize_defaults(db: &DatabaseConnection) -> Result<()> {
    InstituteRepository::new()
        .get_or_create_default(DEFAULT_INSTITUTE_NAME)
        .await
        .context("Failed to ensure institute row")?;

    let existing_admin = principal::Entity::find()
        .filter(principal::Column::Role.eq(RoleEnum::Admin))
        .one(db)
        .await
        .context("Failed to check existing admin")?;

    if existing_admin.is_some() {
        tracing::info!("Admin user already exists, skipping initialization");
        return Ok(());
    }

    tracing::info!("Creating default admin user...");

    let hashed_password = bcrypt::hash(DEFAULT_ADMIN_PASSWORD, APP_CONFIG.bcrypt_cost)
        .context("Failed to hash admin password")?;

    let now = Utc::now().naive_utc();
    let admin = principal::ActiveModel {
        principal_id: Set(Uuid::new_v4()),
        role: Set(RoleEnum::Admin),
        name: Set("System Administrator".to_string()),
        phone: Set(DEFAULT_ADMIN_PHONE.to_string()),
        email: Set(None),
        password: Set(Some(hashed_password)),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };

    admin.insert(db).await.context("Failed to insert admin user")?;

    tracing::info!("Admin user created (phone: {})", DEFAULT_ADMIN_PHONE);
    tracing::warn!("Please change the default admin password after first login!");

    Ok(())
}
