use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entities::institute;
use crate::static_service::DATABASE_CONNECTION;

pub struct InstituteRepository;

impl InstituteRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, institute_id: Uuid) -> Result<Option<institute::Model>> {
        let db = self.get_connection();
        let institute = institute::Entity::find_by_id(institute_id).one(db).await?;
        Ok(institute)
    }

    /// The single institute this deployment serves; created at bootstrap.
    pub async fn get_default(&self) -> Result<Option<institute::Model>> {
        let db = self.get_connection();
        let institute = institute::Entity::find()
            .order_by_asc(institute::Column::CreatedAt)
            .one(db)
            .await?;
        Ok(institute)
    }

    pub async fn get_or_create_default(&self, name: &str) -> Result<institute::Model> {
        if let Some(existing) = self.get_default().await? {
            return Ok(existing);
        }

        let db = self.get_connection();
        let model = institute::ActiveModel {
            institute_id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            phone: Set(None),
            email: Set(None),
            address: Set(None),
            pan_no: Set(None),
            reg_no: Set(None),
            description: Set(None),
            created_at: Set(Utc::now().naive_utc()),
        };

        let result = model.insert(db).await?;
        Ok(result)
    }
}
